//! A contiguous growable array that manages its own uninitialized storage and constructs items
//! in place.
//!
//! This crate provides two layers:
//!
//! - [`RawBuffer<T>`] - an exclusively owned block of uninitialized memory sized for a fixed
//!   number of items, with `unsafe` primitives to construct, destroy, move and swap items in
//!   individual slots. It never tracks which slots are live and never runs destructors on its own.
//! - [`PlacementVec<T>`] - a dynamic array built on one `RawBuffer<T>` plus a count of live
//!   items. All sequence operations (construction, copying, growth, random access, iteration and
//!   positional insertion/removal) are expressed through the buffer primitives.
//!
//! # Key Features
//!
//! - **Explicit storage control**: capacity only changes through
//!   [`reserve()`][PlacementVec::reserve], which acquires exactly what is asked for
//! - **Reportable allocation failure**: every operation that may acquire storage returns a
//!   [`Result`], leaving the collection unchanged on error
//! - **In-place construction**: [`emplace_back()`][PlacementVec::emplace_back] and
//!   [`emplace()`][PlacementVec::emplace] build the new item directly in its slot
//! - **Configurable growth**: doubling by default, see [`GrowthPolicy`]
//! - **Panic safety**: a panic in item code never leaks or double-destroys items
//!
//! # Examples
//!
//! ```rust
//! use placement_vec::PlacementVec;
//!
//! let mut items = PlacementVec::new();
//!
//! items.push(1)?;
//! items.push(2)?;
//! items.push(3)?;
//!
//! assert_eq!(items, [1, 2, 3]);
//! assert_eq!(items.capacity(), 4);
//!
//! items.insert(1, 42)?;
//! assert_eq!(items, [1, 42, 2, 3]);
//!
//! items.erase(1);
//! assert_eq!(items, [1, 2, 3]);
//! # Ok::<(), placement_vec::Error>(())
//! ```
//!
//! ## Sizing and resizing
//!
//! ```rust
//! use placement_vec::PlacementVec;
//!
//! let mut items = PlacementVec::<u32>::with_len(5)?;
//! assert_eq!(items.capacity(), 5);
//!
//! items.resize(2)?;
//! assert_eq!(items, [0, 0]);
//!
//! items.resize(4)?;
//! assert_eq!(items, [0, 0, 0, 0]);
//! # Ok::<(), placement_vec::Error>(())
//! ```
//!
//! # Thread safety
//!
//! The collection has no internal synchronization. It can be moved between threads if `T: Send`
//! and shared between threads if `T: Sync`; mutation from several threads requires an external
//! lock such as [`std::sync::Mutex`].

mod builder;
mod error;
mod growth_policy;
mod placement_vec;
mod raw_buffer;

pub use builder::*;
pub use error::{Error, Result};
pub use growth_policy::*;
pub use placement_vec::PlacementVec;
pub use raw_buffer::RawBuffer;
