//! Report text sent back to command senders

use census_core::{EntityGroup, GroupPage, QueryError};
use std::time::Duration;

/// `---------- Page 2 of 5 ----------`
pub fn page_header(page: usize, page_count: usize) -> String {
    format!("---------- Page {} of {} ----------", page, page_count)
}

/// `(  1)  42 DROPPED_ITEM       (10, 64, -3)`
pub fn group_line(rank: usize, group: &EntityGroup) -> String {
    let block = group.location().block();
    format!(
        "({:>3}) {:>3} {:<18} ({}, {}, {})",
        rank,
        group.count(),
        group.kind().name(),
        block.x,
        block.y,
        block.z
    )
}

/// Header, one line per group, header again.
pub fn page_lines(page: &GroupPage<'_>) -> Vec<String> {
    let header = page_header(page.page, page.page_count);
    let mut lines = Vec::with_capacity(page.groups.len() + 2);
    lines.push(header.clone());
    lines.extend(page.ranked().map(|(rank, group)| group_line(rank, group)));
    lines.push(header);
    lines
}

pub fn teleport_line(group: &EntityGroup) -> String {
    let block = group.location().block();
    format!(
        "Teleporting you to {} {} at ({}, {}, {}).",
        group.count(),
        group.kind().name(),
        block.x,
        block.y,
        block.z
    )
}

pub fn counted_line(regions: usize, elapsed: Duration) -> String {
    format!(
        "Counted {} loaded chunks in {} milliseconds.",
        regions,
        elapsed.as_millis()
    )
}

pub fn sorted_line(groups: usize, elapsed: Duration) -> String {
    format!(
        "Sorted {} entity groups in {} milliseconds.",
        groups,
        elapsed.as_millis()
    )
}

/// Message for a failed `/ec list`.
pub fn list_error(error: &QueryError) -> String {
    match error {
        QueryError::NoResults => "There are 0 results.".to_string(),
        QueryError::PageOutOfRange { page_count, .. } => {
            format!("Valid page numbers are 1 to {}.", page_count)
        }
        other => format!("Unable to list entity groups: {}.", other),
    }
}

/// Message for a failed `/ec tp`.
pub fn teleport_error(error: &QueryError) -> String {
    match error {
        QueryError::NoResults => "There are no results to teleport to.".to_string(),
        QueryError::IdOutOfRange { group_count, .. } => {
            format!("Valid IDs are in the range 1 to {}.", group_count)
        }
        other => format!("Unable to teleport: {}.", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use census_core::{EntityType, Location, WorldId};

    fn group(kind: EntityType, count: u32, x: f64, y: f64, z: f64) -> EntityGroup {
        EntityGroup::new(kind, count, Location::new(WorldId(0), x, y, z))
    }

    #[test]
    fn group_line_aligns_columns() {
        let line = group_line(1, &group(EntityType::Cow, 5, 10.7, 3.2, -0.5));
        assert_eq!(line, "(  1)   5 COW                (10, 3, -1)");
    }

    #[test]
    fn page_lines_wrap_groups_in_headers() {
        let groups = [
            group(EntityType::DroppedItem, 120, 0.0, 64.0, 0.0),
            group(EntityType::Zombie, 9, 1.0, 20.0, 1.0),
        ];
        let page = GroupPage {
            page: 2,
            page_count: 3,
            first_rank: 11,
            groups: &groups,
        };
        let lines = page_lines(&page);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "---------- Page 2 of 3 ----------");
        assert!(lines[1].starts_with("( 11) 120 DROPPED_ITEM"));
        assert!(lines[2].starts_with("( 12)   9 ZOMBIE"));
        assert_eq!(lines[3], lines[0]);
    }

    #[test]
    fn error_messages() {
        assert_eq!(list_error(&QueryError::NoResults), "There are 0 results.");
        assert_eq!(
            list_error(&QueryError::PageOutOfRange { page: 9, page_count: 3 }),
            "Valid page numbers are 1 to 3."
        );
        assert_eq!(
            teleport_error(&QueryError::IdOutOfRange { id: 0, group_count: 40 }),
            "Valid IDs are in the range 1 to 40."
        );
        assert_eq!(
            teleport_error(&QueryError::NoResults),
            "There are no results to teleport to."
        );
    }

    #[test]
    fn timing_lines() {
        assert_eq!(
            counted_line(12, Duration::from_millis(3)),
            "Counted 12 loaded chunks in 3 milliseconds."
        );
        assert_eq!(
            sorted_line(40, Duration::from_micros(900)),
            "Sorted 40 entity groups in 0 milliseconds."
        );
    }
}
