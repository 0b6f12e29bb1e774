//! Pooled doubly linked list with caller-supplied value hooks.
//!
//! See [`linked_list`] for the list itself.
#![no_std]

extern crate alloc;

pub mod linked_list;
