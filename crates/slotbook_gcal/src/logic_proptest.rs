#[cfg(test)]
mod tests {
    use crate::logic::{compute_free_slots, merge_busy_intervals, WorkingWindow};
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use slotbook_common::TimeInterval;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap()
    }

    // Busy intervals as (start minute, length in minutes) within the day
    fn busy_strategy() -> impl Strategy<Value = Vec<TimeInterval>> {
        prop::collection::vec((0i64..1440, 1i64..240), 0..8).prop_map(|raw| {
            raw.into_iter()
                .map(|(start, len)| TimeInterval {
                    start: midnight() + Duration::minutes(start),
                    end: midnight() + Duration::minutes(start + len),
                })
                .collect()
        })
    }

    fn window_strategy() -> impl Strategy<Value = WorkingWindow> {
        (0u32..12, 13u32..=24, prop::sample::select(vec![15i64, 30, 45, 60, 90, 120]))
            .prop_map(|(start, end, duration)| WorkingWindow::new(start, end, duration))
    }

    proptest! {
        #[test]
        fn test_order_of_busy_list_does_not_matter(
            busy in busy_strategy(),
            window in window_strategy(),
        ) {
            let mut reversed = busy.clone();
            reversed.reverse();
            let merged = merge_busy_intervals(&busy);

            let from_input = compute_free_slots(date(), &busy, &window).unwrap();
            let from_reversed = compute_free_slots(date(), &reversed, &window).unwrap();
            let from_merged = compute_free_slots(date(), &merged, &window).unwrap();

            prop_assert_eq!(&from_input, &from_reversed);
            prop_assert_eq!(&from_input, &from_merged);
        }

        #[test]
        fn test_free_slots_never_overlap_busy_and_stay_ordered(
            busy in busy_strategy(),
            window in window_strategy(),
        ) {
            let slots = compute_free_slots(date(), &busy, &window).unwrap();

            for slot in &slots {
                for b in &busy {
                    prop_assert!(!slot.interval.overlaps(b), "{:?} overlaps {:?}", slot, b);
                }
                prop_assert_eq!(
                    slot.interval.duration(),
                    Duration::minutes(window.slot_duration_minutes)
                );
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0].interval.end <= pair[1].interval.start);
            }
        }

        #[test]
        fn test_excluded_candidates_overlap_something(
            busy in busy_strategy(),
            window in window_strategy(),
        ) {
            let grid = compute_free_slots(date(), &[], &window).unwrap();
            let slots = compute_free_slots(date(), &busy, &window).unwrap();

            prop_assert_eq!(grid.len(), window.slot_count());
            for candidate in &grid {
                let kept = slots.contains(candidate);
                let blocked = busy.iter().any(|b| candidate.interval.overlaps(b));
                prop_assert_eq!(kept, !blocked);
            }
        }

        #[test]
        fn test_merged_intervals_are_sorted_and_disjoint(busy in busy_strategy()) {
            let merged = merge_busy_intervals(&busy);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].end < pair[1].start);
            }
            let total_in: i64 = busy.iter().map(|b| b.duration().num_minutes()).sum();
            let total_out: i64 = merged.iter().map(|b| b.duration().num_minutes()).sum();
            prop_assert!(total_out <= total_in);
        }
    }
}
