//! Wallet address helpers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Mainnet standard principal: `SP` followed by 38 upper-case alphanumerics.
    static ref STACKS_ADDRESS: Regex = Regex::new(r"^SP[0-9A-Z]{38}$").unwrap();
}

pub fn is_stacks_address(s: &str) -> bool {
    STACKS_ADDRESS.is_match(s)
}

/// `SP1K1A...4Z0K` style abbreviation for display.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
