// NetWeave: Compiling Abstract Network Models into Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Interface index allocation for platform-specific interface names

/// Allocator for platform-specific interface indices. An infinite, monotonically increasing
/// iterator over non-negative integers, permanently skipping every index for which the reserved
/// predicate holds. Each compiled device owns a fresh allocator, so the sequence restarts at the
/// origin per device and two runs over the same device yield identical names.
///
/// ```rust
/// use netweave::platform::InterfaceAllocator;
///
/// let names: Vec<String> = InterfaceAllocator::new(|idx| idx == 2)
///     .map(|idx| format!("ge-0/0/{}", idx))
///     .take(4)
///     .collect();
/// assert_eq!(names, vec!["ge-0/0/0", "ge-0/0/1", "ge-0/0/3", "ge-0/0/4"]);
/// ```
#[derive(Debug, Clone)]
pub struct InterfaceAllocator<F> {
    next_index: u32,
    reserved: F,
}

impl InterfaceAllocator<fn(u32) -> bool> {
    /// Create an allocator issuing every index, with no reserved slots.
    pub fn unrestricted() -> Self {
        fn no_reserved(_: u32) -> bool {
            false
        }
        Self { next_index: 0, reserved: no_reserved }
    }
}

impl<F: Fn(u32) -> bool> InterfaceAllocator<F> {
    /// Create an allocator starting at the sequence origin, skipping every index for which the
    /// predicate returns true.
    pub fn new(reserved: F) -> Self {
        Self { next_index: 0, reserved }
    }
}

impl<F: Fn(u32) -> bool> Iterator for InterfaceAllocator<F> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            let idx = self.next_index;
            self.next_index += 1;
            if !(self.reserved)(idx) {
                return Some(idx);
            }
        }
    }
}
