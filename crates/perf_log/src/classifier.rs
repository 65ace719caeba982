use crate::counter::CounterName;
use crate::ParseError;

/// First token of the benchmark's runtime line
pub const DURATION_MARKER: &str = "Took:";

/// Unit column perf prints after the interval timestamp
const UNIT_TOKEN: &str = "msec";

/// One counter reading from an interval line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the start of the run
    pub timestamp: f64,
    pub count: u64,
    pub counter: CounterName,
}

/// What a single log line turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum LineRecord {
    Sample(Sample),
    /// Runtime reported by the benchmark
    Duration(f64),
    Unrecognized(ParseError),
}

/// Classifies one raw log line.
///
/// Never fails: anything that is not a well-formed sample of a known counter
/// or a `Took:` line comes back as [`LineRecord::Unrecognized`] with the
/// reason attached.
///
/// # Examples
///
/// ```
/// use perf_log::{classify_line, CounterName, LineRecord, Sample};
///
/// let record = classify_line("1.001 msec 12,345 itlb_misses.walk_pending");
/// assert_eq!(
///     record,
///     LineRecord::Sample(Sample {
///         timestamp: 1.001,
///         count: 12_345,
///         counter: CounterName::ItlbWalkPending,
///     })
/// );
///
/// assert_eq!(classify_line("Took: 12.5\n"), LineRecord::Duration(12.5));
/// ```
pub fn classify_line(line: &str) -> LineRecord {
    let line = line.trim_end_matches(['\r', '\n']);

    let result = if line.split(' ').next() == Some(DURATION_MARKER) {
        parse_duration(line).map(LineRecord::Duration)
    } else {
        parse_sample(line).map(LineRecord::Sample)
    };

    result.unwrap_or_else(LineRecord::Unrecognized)
}

fn parse_duration(line: &str) -> Result<f64, ParseError> {
    let value = line
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or(ParseError::MissingDuration)?;

    match value.parse::<f64>() {
        Ok(runtime) if runtime.is_finite() => Ok(runtime),
        _ => Err(ParseError::InvalidDuration(value.to_string())),
    }
}

fn parse_sample(line: &str) -> Result<Sample, ParseError> {
    let mut fields = line
        .split(' ')
        .filter(|token| !token.is_empty() && *token != UNIT_TOKEN);

    let timestamp = parse_timestamp(fields.next().ok_or(ParseError::MissingFields(0))?)?;
    let count = parse_count(fields.next().ok_or(ParseError::MissingFields(1))?)?;
    let counter = fields
        .next()
        .ok_or(ParseError::MissingFields(2))?
        .parse::<CounterName>()?;

    Ok(Sample {
        timestamp,
        count,
        counter,
    })
}

fn parse_timestamp(field: &str) -> Result<f64, ParseError> {
    match field.parse::<f64>() {
        Ok(timestamp) if timestamp.is_finite() && timestamp >= 0.0 => Ok(timestamp),
        _ => Err(ParseError::InvalidTimestamp(field.to_string())),
    }
}

fn parse_count(field: &str) -> Result<u64, ParseError> {
    field
        .replace(',', "")
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidCount(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample(timestamp: f64, count: u64, counter: CounterName) -> LineRecord {
        LineRecord::Sample(Sample {
            timestamp,
            count,
            counter,
        })
    }

    #[rstest]
    #[case("1.0 msec 100 dtlb_load_misses.walk_completed", sample(1.0, 100, CounterName::DtlbLoadWalkCompleted))]
    #[case("2.5 msec 7 cycles:ukhHG", sample(2.5, 7, CounterName::Cycles))]
    #[case("0 msec 0 itlb_misses.walk_active", sample(0.0, 0, CounterName::ItlbWalkActive))]
    #[case("3.25 msec 42 dtlb_store_misses.walk_pending\n", sample(3.25, 42, CounterName::DtlbStoreWalkPending))]
    #[case("3.25 msec 42 dtlb_store_misses.walk_pending\r\n", sample(3.25, 42, CounterName::DtlbStoreWalkPending))]
    fn test_sample_lines(#[case] line: &str, #[case] expected: LineRecord) {
        assert_eq!(classify_line(line), expected);
    }

    #[test]
    fn test_padded_perf_columns() {
        let line = "     1.002108231 msec          1,234      itlb_misses.walk_completed          #  1.2 M/sec";
        assert_eq!(
            classify_line(line),
            sample(1.002108231, 1234, CounterName::ItlbWalkCompleted)
        );
    }

    #[rstest]
    #[case("1,234", 1234)]
    #[case("1,234,567", 1_234_567)]
    #[case("987", 987)]
    fn test_count_commas_are_stripped(#[case] count: &str, #[case] expected: u64) {
        let line = format!("1.0 msec {} cycles:ukhHG", count);
        assert_eq!(classify_line(&line), sample(1.0, expected, CounterName::Cycles));
    }

    #[test]
    fn test_unit_token_is_optional() {
        assert_eq!(
            classify_line("4.0 12 dtlb_load_misses.walk_pending"),
            sample(4.0, 12, CounterName::DtlbLoadWalkPending)
        );
    }

    #[rstest]
    #[case("Took: 12.5\n", 12.5)]
    #[case("Took: 12.5", 12.5)]
    #[case("Took: 100 msec", 100.0)]
    fn test_duration_lines(#[case] line: &str, #[case] expected: f64) {
        assert_eq!(classify_line(line), LineRecord::Duration(expected));
    }

    #[test]
    fn test_duration_marker_takes_priority() {
        // Would otherwise be rejected as a timestamp, not as a duration
        assert_eq!(
            classify_line("Took: abc"),
            LineRecord::Unrecognized(ParseError::InvalidDuration("abc".to_string()))
        );
    }

    #[rstest]
    #[case("", ParseError::MissingFields(0))]
    #[case("1.0 msec", ParseError::MissingFields(1))]
    #[case("1.0 msec 100", ParseError::MissingFields(2))]
    #[case("abc msec 100 cycles:ukhHG", ParseError::InvalidTimestamp("abc".to_string()))]
    #[case("-1.0 msec 100 cycles:ukhHG", ParseError::InvalidTimestamp("-1.0".to_string()))]
    #[case("NaN msec 100 cycles:ukhHG", ParseError::InvalidTimestamp("NaN".to_string()))]
    #[case("inf msec 100 cycles:ukhHG", ParseError::InvalidTimestamp("inf".to_string()))]
    #[case("1.0 msec 1.5 cycles:ukhHG", ParseError::InvalidCount("1.5".to_string()))]
    #[case("1.0 msec -3 cycles:ukhHG", ParseError::InvalidCount("-3".to_string()))]
    #[case("1.0 msec <not counted> cycles:ukhHG", ParseError::InvalidCount("<not".to_string()))]
    #[case("1.0 msec 100 instructions", ParseError::UnknownCounter("instructions".to_string()))]
    #[case("Took:", ParseError::MissingDuration)]
    #[case("Took:  12.5", ParseError::MissingDuration)]
    #[case("Took: inf", ParseError::InvalidDuration("inf".to_string()))]
    #[case(" Took: 12.5", ParseError::InvalidTimestamp("Took:".to_string()))]
    fn test_unrecognized_lines(#[case] line: &str, #[case] reason: ParseError) {
        assert_eq!(classify_line(line), LineRecord::Unrecognized(reason));
    }
}
