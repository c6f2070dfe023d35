//! Normalize command handler

use crate::domain::collation::normalize;

pub fn cmd_normalize(words: &[String]) {
    let text = words.join(" ");
    println!("{}", normalize(&text));
}
