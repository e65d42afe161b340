//! Reader Output (§4.4(f), §6): the line format emitted by rank 1 at every
//! tick advance, before that tick's values are committed.

/// Formats one observation line. The reader device's `outputPrefix` is
/// parsed (§6) but does not presently parameterize this format (§9).
pub fn format_line(tick: i64, neuron_id: usize, activity_level: i32) -> String {
    format!("Time:{tick} Neuron:{neuron_id} Activity Level:{activity_level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_documented() {
        assert_eq!(
            format_line(3, 7, 5),
            "Time:3 Neuron:7 Activity Level:5"
        );
    }
}
