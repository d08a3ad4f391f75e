//! Sample module used by the end-to-end outline tests.

use std::collections::HashMap;
use std::fmt;

/// Maximum number of retries.
pub const MAX_RETRIES: u32 = 3;

static COUNTER: u32 = 0;

/// A point in 2D space.
#[derive(Debug, Clone, Copy)]
pub struct Point { x: i32, y: i32 }

/// Connection settings.
///
/// Built with [`Settings::new`].
#[derive(Debug)]
pub struct Settings {
    /// Host to connect to { not a brace }
    pub host: String, // e.g. "localhost"
    #[allow(dead_code)]
    port: u16,
    buffer: [u8; 4],
}

pub enum Mode {
    Fast,
    Careful { retries: u32 },
}

pub struct Meters(f64);

/// Orphaned doc comment.
use std::io;

/// Adds two numbers.
pub fn add(a: i32, b: i32) -> i32 { a + b }

/// Builds a lookup table.

pub fn build_table(
    keys: &[&str],
    default: u32,
) -> HashMap<String, u32> {
    // inner comment with a brace {
    let mut table = HashMap::new();
    for key in keys {
        table.insert(key.to_string(), default);
    }
    fn helper() {}
    table
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub trait Shape {
    fn area(&self) -> f64;
}

pub(crate) async fn fetch()
where
    Self: Sized,
{
}

fn unterminated() {
    if true {
