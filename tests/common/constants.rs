//! Seed data shared by the end-to-end tests.

#![allow(dead_code)]

pub const BOOK_1_ID: &str = "B1";
pub const BOOK_1_TITLE: &str = "Dune";
pub const BOOK_1_AUTHOR: &str = "Frank Herbert";
pub const BOOK_1_GENRE: &str = "SciFi";

pub const BOOK_2_ID: &str = "B2";
pub const BOOK_2_TITLE: &str = "Emma";
pub const BOOK_2_AUTHOR: &str = "Jane Austen";

pub const BOOK_3_ID: &str = "B3";
pub const BOOK_3_TITLE: &str = "Neuromancer";
pub const BOOK_3_AUTHOR: &str = "William Gibson";
pub const BOOK_3_GENRE: &str = "Cyberpunk";

pub const SEEDED_BOOKS: usize = 3;
