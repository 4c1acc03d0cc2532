// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `tabia` is a small mailbox chess-position library. It parses FEN into an
//! in-memory position, enumerates pseudo-legal destination squares per piece,
//! detects attacked squares and checks, and applies moves (including
//! promotion). It is built to mirror an authoritative remote game state, so
//! castling, en passant and draw-rule tracking are deliberately absent: those
//! calls belong to the rules arbiter on the other side of the wire.

pub mod core;
pub mod movegen;
pub mod position;
pub mod remote;

pub use position::Position;
