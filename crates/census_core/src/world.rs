// world.rs - Entity counts for one world
//
// Holds one RegionCount per loaded region at the time of the last rebuild,
// plus a lazily sorted list of entity groups. The sorted list is only valid
// for the exact set of regions counted since it was built: clear() and
// count_region() both drop it.

use crate::counts::EntityCounts;
use crate::entity::{EntitySnapshot, EntityType};
use crate::group::EntityGroup;
use crate::region::{RegionCoord, RegionCount};
use once_cell::unsync::OnceCell;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors returned by paged and indexed group lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("there are no entity groups")]
    NoResults,

    #[error("page {page} is outside 1..={page_count}")]
    PageOutOfRange { page: i64, page_count: usize },

    #[error("id {id} is outside 1..={group_count}")]
    IdOutOfRange { id: i64, group_count: usize },

    #[error("page size must be at least 1")]
    InvalidPageSize,
}

/// Total entity counts for a world, highest count first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: u64,
    /// Every kind with its count; ties keep ordinal order.
    pub totals: Vec<(EntityType, u32)>,
}

impl fmt::Display for Summary {
    /// `Total: 6, COW: 5, ZOMBIE: 1`, stopping at the first zero count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total: {}", self.total)?;
        for (kind, count) in self.totals.iter().take_while(|(_, count)| *count != 0) {
            write!(f, ", {}: {}", kind, count)?;
        }
        Ok(())
    }
}

/// One page of ranked groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPage<'a> {
    pub page: usize,
    pub page_count: usize,
    /// 1-based rank of the first group on the page.
    pub first_rank: usize,
    pub groups: &'a [EntityGroup],
}

impl<'a> GroupPage<'a> {
    /// `(rank, group)` pairs, ranks starting at 1.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &'a EntityGroup)> + 'a {
        let first_rank = self.first_rank;
        let groups = self.groups;
        groups
            .iter()
            .enumerate()
            .map(move |(offset, group)| (first_rank + offset, group))
    }
}

/// Number of pages needed for `items` at `page_size` per page.
pub fn page_count(items: usize, page_size: usize) -> usize {
    items.div_ceil(page_size)
}

/// Stores all the count information for one world.
#[derive(Debug, Default)]
pub struct WorldCount {
    regions: Vec<RegionCount>,
    sorted: OnceCell<Vec<EntityGroup>>,
}

impl WorldCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all counts and reserve space for `expected_regions`.
    pub fn clear(&mut self, expected_regions: usize) {
        self.regions = Vec::with_capacity(expected_regions);
        self.sorted.take();
    }

    /// Count every entity of one region and keep the result.
    pub fn count_region<I>(&mut self, coord: RegionCoord, entities: I)
    where
        I: IntoIterator<Item = EntitySnapshot>,
    {
        self.regions.push(RegionCount::from_entities(coord, entities));
        self.sorted.take();
    }

    /// True if any region was counted since the last clear.
    pub fn has_counts(&self) -> bool {
        !self.regions.is_empty()
    }

    /// True if the sorted group list is currently cached.
    pub fn is_sorted(&self) -> bool {
        self.sorted.get().is_some()
    }

    /// Sum the counts of every cell and rank kinds by count.
    pub fn summarise(&self) -> Summary {
        let mut accumulator = EntityCounts::new();
        for region in &self.regions {
            for (_, cell) in region.cells() {
                cell.add_counts_to(&mut accumulator);
            }
        }

        let mut totals: Vec<(EntityType, u32)> = EntityType::ALL
            .iter()
            .map(|&kind| (kind, accumulator.total(kind)))
            .collect();
        // Stable: equal counts stay in ordinal order.
        totals.sort_by(|left, right| right.1.cmp(&left.1));

        Summary {
            total: accumulator.grand_total(),
            totals,
        }
    }

    /// Every group of every cell, highest count first.
    ///
    /// Built on first use and cached until the counts change. Equal counts
    /// keep region, then cell, then ordinal order.
    pub fn sorted_groups(&self) -> &[EntityGroup] {
        self.sorted.get_or_init(|| {
            let mut groups = Vec::with_capacity(self.regions.len());
            for region in &self.regions {
                for (_, cell) in region.cells() {
                    cell.add_entity_groups_to(&mut groups);
                }
            }
            groups.sort_by(|left, right| right.count().cmp(&left.count()));
            debug!(groups = groups.len(), regions = self.regions.len(), "sorted entity groups");
            groups
        })
    }

    /// Page `page` (1-based) of the ranked groups.
    pub fn list(&self, page: i64, page_size: usize) -> Result<GroupPage<'_>, QueryError> {
        if page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }

        let groups = self.sorted_groups();
        let page_count = page_count(groups.len(), page_size);
        if page_count == 0 {
            return Err(QueryError::NoResults);
        }
        if page < 1 || page as u64 > page_count as u64 {
            return Err(QueryError::PageOutOfRange { page, page_count });
        }

        let page = page as usize;
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(groups.len());
        Ok(GroupPage {
            page,
            page_count,
            first_rank: start + 1,
            groups: &groups[start..end],
        })
    }

    /// Group with 1-based rank `id`.
    pub fn group(&self, id: i64) -> Result<&EntityGroup, QueryError> {
        let groups = self.sorted_groups();
        if groups.is_empty() {
            return Err(QueryError::NoResults);
        }
        id.checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| groups.get(index))
            .ok_or(QueryError::IdOutOfRange {
                id,
                group_count: groups.len(),
            })
    }
}
