//! Basic usage of the `placement_vec` crate:
//!
//! * Creating a collection.
//! * Appending and constructing items in place.
//! * Inserting and erasing in the middle.
//! * Reserving storage up front.

use placement_vec::{GrowthPolicy, PlacementVec};

fn main() -> Result<(), placement_vec::Error> {
    let mut names = PlacementVec::<String>::new();

    // Every operation that may acquire storage reports failure instead of aborting.
    names.push("Alice".to_string())?;
    names.push("Charlie".to_string())?;

    println!(
        "Collection contains {} items, with a doubling capacity of {}",
        names.len(),
        names.capacity()
    );

    // The new item is built directly in its final slot.
    names.emplace(1, || "Bob".to_string())?;
    println!("After insertion: {names:?}");

    if let Some(next) = names.erase(0) {
        println!("Erased the first item, the item now at its position is {next}");
    }

    // Capacity only grows when asked for or when an append runs out of room.
    let mut numbers = PlacementVec::<u64>::builder()
        .capacity(16)
        .growth_policy(GrowthPolicy::Exact)
        .build()?;

    numbers.extend_from_slice(&[1, 2, 3])?;
    numbers.resize(6)?;

    println!(
        "Numbers: {numbers:?} (len {}, capacity {})",
        numbers.len(),
        numbers.capacity()
    );

    Ok(())
}
