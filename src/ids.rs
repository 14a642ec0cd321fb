//! Record id generation.

use rand::Rng;

const SUFFIX_LEN: usize = 9;

/// New record id: `<unix millis>-<9 chars of [a-z0-9]>`.
///
/// Sortable by creation time to the millisecond; the random suffix keeps ids
/// minted in the same millisecond apart.
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| std::char::from_digit(rng.random_range(0..36u32), 36).unwrap_or('0'))
        .collect();
    format!("{millis}-{suffix}")
}
