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

use crate::platform::{DynagenCompiler, InterfaceAllocator, JunosphereCompiler};
use std::collections::HashSet;

#[test]
fn unrestricted_sequence() {
    let indices: Vec<u32> = InterfaceAllocator::unrestricted().take(5).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn reserved_slot_skipped() {
    // requesting 5 identifiers with slot 2 reserved yields the raw indices 0, 1, 3, 4, 5
    let indices: Vec<u32> = InterfaceAllocator::new(|idx| idx == 2).take(5).collect();
    assert_eq!(indices, vec![0, 1, 3, 4, 5]);
}

#[test]
fn no_repeats_and_no_reserved() {
    let indices: Vec<u32> = InterfaceAllocator::new(|idx| idx % 7 == 0).take(100).collect();
    let unique: HashSet<u32> = indices.iter().cloned().collect();
    assert_eq!(unique.len(), indices.len());
    assert!(indices.iter().all(|idx| idx % 7 != 0));
}

#[test]
fn restartable() {
    let a: Vec<u32> = InterfaceAllocator::new(|idx| idx == 2).take(20).collect();
    let b: Vec<u32> = InterfaceAllocator::new(|idx| idx == 2).take(20).collect();
    assert_eq!(a, b);
}

#[test]
fn junosphere_names() {
    let names: Vec<String> = JunosphereCompiler::interface_names().take(4).collect();
    assert_eq!(names, vec!["ge-0/0/0", "ge-0/0/1", "ge-0/0/3", "ge-0/0/4"]);
}

#[test]
fn dynagen_names() {
    let names: Vec<String> = DynagenCompiler::interface_names().take(3).collect();
    assert_eq!(
        names,
        vec!["gigabitethernet0/0/0/0", "gigabitethernet0/0/0/1", "gigabitethernet0/0/0/2"]
    );
}
