// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Month view workflows: materialize, search and group.

use jiff::civil::{date, time};

use evcal_core::{
    Calendar, ConflictCandidate, DisplayMode, MemoryRepository, Query, Recurrence, has_conflict,
};

use crate::common::{TestConfigBuilder, assert_dates, test_draft};

async fn january_calendar() -> Calendar {
    let mut calendar = Calendar::with_repository(
        TestConfigBuilder::new().build(),
        MemoryRepository::default(),
    )
    .await
    .unwrap();

    for draft in [
        test_draft("Team Standup", date(2024, 1, 1), time(9, 0, 0, 0), Recurrence::Weekly),
        test_draft("Dentist", date(2024, 1, 17), time(15, 0, 0, 0), Recurrence::None),
        test_draft("Rent", date(2023, 12, 31), time(8, 0, 0, 0), Recurrence::Monthly),
        test_draft("Vacation", date(2024, 2, 10), time(8, 0, 0, 0), Recurrence::Daily),
    ] {
        calendar.add(draft).await.unwrap();
    }
    calendar
}

#[tokio::test]
async fn month_view_expands_recurring_events() {
    let calendar = january_calendar().await;

    let view = calendar.month_view(2024, 1, &Query::default()).unwrap();

    assert_eq!(view.mode, DisplayMode::FullMonth);
    let standups: Vec<_> = view
        .instances
        .iter()
        .filter(|i| i.title == "Team Standup")
        .cloned()
        .collect();
    assert_dates(
        &standups,
        &[
            date(2024, 1, 1),
            date(2024, 1, 8),
            date(2024, 1, 15),
            date(2024, 1, 22),
            date(2024, 1, 29),
        ],
    );
    assert!(view.instances.iter().all(|i| i.title != "Vacation"));
    assert_eq!(view.visible_dates().len(), 31);
}

#[tokio::test]
async fn month_view_clamps_monthly_events() {
    let calendar = january_calendar().await;

    let february = calendar.month_view(2024, 2, &Query::new("rent")).unwrap();
    assert_dates(&february.instances, &[date(2024, 2, 29)]);

    let march = calendar.month_view(2024, 3, &Query::new("rent")).unwrap();
    assert_dates(&march.instances, &[date(2024, 3, 31)]);
}

#[tokio::test]
async fn month_view_search_shows_matching_days_only() {
    let calendar = january_calendar().await;

    let view = calendar.month_view(2024, 1, &Query::new("DENT")).unwrap();

    assert_eq!(view.mode, DisplayMode::SearchResults);
    assert_eq!(view.visible_dates(), vec![date(2024, 1, 17)]);
    assert_eq!(view.by_date().len(), 1);

    let view = calendar.month_view(2024, 1, &Query::new("birthday")).unwrap();
    assert!(view.has_no_results());
}

#[tokio::test]
async fn month_view_grid_flows_into_search_and_back() {
    let calendar = january_calendar().await;

    let full = calendar.month_view(2024, 1, &Query::new("")).unwrap();
    let search = calendar.month_view(2024, 1, &Query::new("standup")).unwrap();
    let cleared = calendar.month_view(2024, 1, &Query::new("   ")).unwrap();

    assert_eq!(search.matching_dates.len(), 5);
    assert_eq!(full, cleared);
}

#[tokio::test]
async fn month_view_conflicts_use_stored_anchor_dates() {
    let calendar = january_calendar().await;
    let events = calendar.events();

    let on_anchor = ConflictCandidate::new("new", date(2024, 1, 1), time(9, 0, 0, 0));
    assert!(has_conflict(&on_anchor, events));

    let on_occurrence = ConflictCandidate::new("new", date(2024, 1, 8), time(9, 0, 0, 0));
    assert!(!has_conflict(&on_occurrence, events));
}

#[tokio::test]
async fn month_view_rejects_invalid_month() {
    let calendar = january_calendar().await;
    assert!(calendar.month_view(2024, 13, &Query::default()).is_err());
}
