//! Relative volume intensity.

use crate::types::IntervalSeries;

const LOOKBACK: usize = 4;

/// For each interval, how many of the preceding four intervals traded less
/// volume (0 to 4). Fewer than four predecessors cap the count.
pub fn volume_weights(series: &IntervalSeries) -> Vec<u8> {
    series
        .intervals()
        .iter()
        .enumerate()
        .map(|(index, interval)| {
            series
                .preceding(index, LOOKBACK)
                .filter(|previous| interval.volume > previous.volume)
                .count() as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::testing::bar;
    use crate::types::Granularity;

    #[test]
    fn test_volume_weights() {
        let volumes = [100.0, 50.0, 200.0, 150.0, 300.0, 10.0];
        let intervals = volumes
            .iter()
            .enumerate()
            .map(|(i, v)| bar(i, 10.0, 11.0, 9.0, 10.0, *v))
            .collect();
        let series = IntervalSeries::new(Granularity::Intraday, intervals).unwrap();

        assert_eq!(volume_weights(&series), vec![0, 0, 2, 2, 4, 0]);
    }
}
