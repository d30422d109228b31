use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::catalog::{BarrierLevel, Category, MaterialStructure};

/// Sortable columns of the structures view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Otr,
    Wvtr,
    BarrierLevel,
    Thickness,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Structure",
            SortKey::Otr => "OTR",
            SortKey::Wvtr => "WVTR",
            SortKey::BarrierLevel => "Barrier",
            SortKey::Thickness => "Thickness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Applies the direction to an ascending comparison. Descending is the
    /// same comparator reversed, never a second comparison path.
    pub fn order(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "low→high",
            SortDirection::Descending => "high→low",
        }
    }
}

/// Exact-match constraints over the filterable attributes. `None` means no
/// constraint; active constraints compose with AND.
///
/// The category slot is pinned by the tab's source rather than exposed as a
/// toolbar control, so [`FilterSelection::clear`] leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: Option<Category>,
    pub has_window: Option<bool>,
    pub has_kraft: Option<bool>,
    pub barrier_level: Option<BarrierLevel>,
}

impl FilterSelection {
    pub fn matches(&self, s: &MaterialStructure) -> bool {
        if let Some(category) = self.category {
            if s.category != category {
                return false;
            }
        }
        if let Some(has_window) = self.has_window {
            if s.has_window != has_window {
                return false;
            }
        }
        if let Some(has_kraft) = self.has_kraft {
            if s.has_kraft != has_kraft {
                return false;
            }
        }
        if let Some(level) = self.barrier_level {
            if s.barrier_level != level {
                return false;
            }
        }
        true
    }

    /// Count of user-toggleable constraints in effect (the category pin is
    /// not one of them).
    pub fn active_count(&self) -> usize {
        usize::from(self.has_window.is_some())
            + usize::from(self.has_kraft.is_some())
            + usize::from(self.barrier_level.is_some())
    }

    pub fn clear(&mut self) {
        self.has_window = None;
        self.has_kraft = None;
        self.barrier_level = None;
    }
}

/// Transient per-tab view selection: sort key, direction, filters, and the
/// quick-search text. Discarded with the tab; persisted only as a convenience
/// through the saved UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub filters: FilterSelection,
    pub search: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::BarrierLevel,
            direction: SortDirection::Ascending,
            filters: FilterSelection::default(),
            search: String::new(),
        }
    }
}

impl ViewState {
    /// Header-click behavior: clicking the active key flips the direction,
    /// clicking another key sorts by it ascending.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

fn search_matches(s: &MaterialStructure, needle: &str) -> bool {
    s.name.to_lowercase().contains(needle)
        || s.short_name.to_lowercase().contains(needle)
        || s.feature.to_lowercase().contains(needle)
        || s.best_for.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Computes the filtered, ordered view of `structures` as indices into it.
///
/// Pure: the source slice is never reordered and equal inputs produce equal
/// outputs. The sort is stable, so ties on the active key keep the relative
/// order of the filtered input. The only failure is a record whose thickness
/// has no leading digits while thickness is the sort key; that aborts the
/// whole computation instead of producing a partial ordering.
pub fn apply_indices(structures: &[MaterialStructure], view: &ViewState) -> Result<Vec<usize>> {
    let needle = view.search.trim().to_lowercase();
    let mut rows: Vec<usize> = structures
        .iter()
        .enumerate()
        .filter(|(_, s)| view.filters.matches(s) && (needle.is_empty() || search_matches(s, &needle)))
        .map(|(idx, _)| idx)
        .collect();

    match view.sort_key {
        SortKey::Name => {
            rows.sort_by(|&a, &b| view.direction.order(structures[a].name.cmp(&structures[b].name)));
        }
        SortKey::Otr => {
            rows.sort_by(|&a, &b| view.direction.order(structures[a].otr.total_cmp(&structures[b].otr)));
        }
        SortKey::Wvtr => {
            rows.sort_by(|&a, &b| view.direction.order(structures[a].wvtr.total_cmp(&structures[b].wvtr)));
        }
        SortKey::BarrierLevel => {
            rows.sort_by(|&a, &b| {
                view.direction.order(
                    structures[a]
                        .barrier_level
                        .rank()
                        .cmp(&structures[b].barrier_level.rank()),
                )
            });
        }
        SortKey::Thickness => {
            // Parse every thickness up front so one malformed record fails
            // the view instead of feeding the comparator a bogus key.
            let mut keyed: Vec<(u32, usize)> = rows
                .into_iter()
                .map(|idx| Ok((structures[idx].thickness_microns()?, idx)))
                .collect::<Result<_>>()?;
            keyed.sort_by(|a, b| view.direction.order(a.0.cmp(&b.0)));
            return Ok(keyed.into_iter().map(|(_, idx)| idx).collect());
        }
    }

    Ok(rows)
}

/// Reference-returning form of [`apply_indices`].
pub fn apply<'a>(
    structures: &'a [MaterialStructure],
    view: &ViewState,
) -> Result<Vec<&'a MaterialStructure>> {
    Ok(apply_indices(structures, view)?
        .into_iter()
        .map(|idx| &structures[idx])
        .collect())
}

/// Memoized wrapper around [`apply_indices`], cheap to call every frame.
///
/// The cached ordering is reused as long as both the source collection
/// identity (pointer and length) and the view state are unchanged; any change
/// in either recomputes.
#[derive(Debug, Clone, Default)]
pub struct CachedView {
    key: Option<(usize, usize, ViewState)>,
    rows: Vec<usize>,
    #[cfg(test)]
    recomputes: usize,
}

impl CachedView {
    pub fn rows(&mut self, structures: &[MaterialStructure], view: &ViewState) -> Result<&[usize]> {
        let (ptr, len) = (structures.as_ptr() as usize, structures.len());
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(p, l, state)| *p == ptr && *l == len && state == view);
        if !fresh {
            self.key = None;
            self.rows = apply_indices(structures, view)?;
            self.key = Some((ptr, len, view.clone()));
            #[cfg(test)]
            {
                self.recomputes += 1;
            }
        }
        Ok(&self.rows)
    }

    #[cfg(test)]
    fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn structure(
        id: &str,
        name: &str,
        otr: f64,
        wvtr: f64,
        thickness: &str,
        barrier_level: BarrierLevel,
        has_window: bool,
        has_kraft: bool,
    ) -> MaterialStructure {
        MaterialStructure {
            id: id.to_string(),
            name: name.to_string(),
            short_name: name.to_string(),
            img: format!("/imgs/spec/{id}.webp"),
            url: format!("/spec/{id}"),
            otr,
            otr_display: format!("<{otr}"),
            wvtr,
            wvtr_display: format!("<{wvtr}"),
            thickness: thickness.to_string(),
            barrier_level,
            has_window,
            has_kraft,
            has_metalised: false,
            has_aluminum: false,
            best_for: vec!["coffee".to_string()],
            feature: "High Barrier".to_string(),
            category: Category::Pcr,
        }
    }

    fn view_sorted_by(key: SortKey, direction: SortDirection) -> ViewState {
        ViewState {
            sort_key: key,
            direction,
            ..ViewState::default()
        }
    }

    #[test]
    fn default_view_sorts_by_barrier_ascending_with_no_filters() {
        let view = ViewState::default();
        assert_eq!(view.sort_key, SortKey::BarrierLevel);
        assert_eq!(view.direction, SortDirection::Ascending);
        assert_eq!(view.filters.active_count(), 0);
        assert!(view.search.is_empty());
    }

    #[test]
    fn barrier_sorts_by_rank_and_otr_numerically() {
        // B(mid, otr 10) vs A(high, otr 5): barrier ascending puts mid first
        // even though "high" < "mid" lexically; otr ascending puts A first.
        let records = vec![
            structure("b", "B", 10.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
            structure("a", "A", 5.0, 1.0, "100μm", BarrierLevel::High, false, false),
        ];

        let by_barrier = apply(&records, &view_sorted_by(SortKey::BarrierLevel, SortDirection::Ascending)).unwrap();
        assert_eq!(by_barrier.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["b", "a"]);

        let by_otr = apply(&records, &view_sorted_by(SortKey::Otr, SortDirection::Ascending)).unwrap();
        assert_eq!(by_otr.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn barrier_filter_keeps_exact_matches_only() {
        let records = vec![
            structure("b", "B", 10.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
            structure("a", "A", 5.0, 1.0, "100μm", BarrierLevel::High, false, false),
        ];
        let mut view = ViewState::default();
        view.filters.barrier_level = Some(BarrierLevel::High);

        let rows = apply(&records, &view).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "a");
    }

    #[test]
    fn filters_compose_with_and() {
        let records = vec![
            structure("w", "W", 1.0, 1.0, "100μm", BarrierLevel::Mid, true, false),
            structure("k", "K", 1.0, 1.0, "100μm", BarrierLevel::Mid, false, true),
            structure("wk", "WK", 1.0, 1.0, "100μm", BarrierLevel::Mid, true, true),
            structure("n", "N", 1.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
        ];
        let mut view = ViewState::default();
        view.filters.has_window = Some(true);
        view.filters.has_kraft = Some(true);

        let rows = apply(&records, &view).unwrap();
        assert_eq!(rows.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["wk"]);
    }

    #[test]
    fn filtering_to_nothing_is_not_an_error() {
        let records = vec![structure("a", "A", 1.0, 1.0, "100μm", BarrierLevel::Low, false, false)];
        let mut view = ViewState::default();
        view.filters.barrier_level = Some(BarrierLevel::Ultra);
        assert!(apply(&records, &view).unwrap().is_empty());
    }

    #[test]
    fn thickness_sorts_by_leading_integer_not_string() {
        // "100μm" < "80μm" as strings; numerically 80 comes first.
        let records = vec![
            structure("thick", "Thick", 1.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
            structure("thin", "Thin", 1.0, 1.0, "80μm", BarrierLevel::Mid, false, false),
        ];
        let rows = apply(&records, &view_sorted_by(SortKey::Thickness, SortDirection::Ascending)).unwrap();
        assert_eq!(rows.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["thin", "thick"]);
    }

    #[test]
    fn malformed_thickness_fails_the_whole_view() {
        let records = vec![
            structure("ok", "Ok", 1.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
            structure("bad", "Bad", 1.0, 1.0, "varies", BarrierLevel::Mid, false, false),
        ];
        let err = apply(&records, &view_sorted_by(SortKey::Thickness, SortDirection::Ascending)).unwrap_err();
        assert!(err.to_string().contains("no leading digits"));

        // The same records still sort fine on keys that do not touch thickness
        assert_eq!(apply(&records, &view_sorted_by(SortKey::Name, SortDirection::Ascending)).unwrap().len(), 2);
    }

    #[test]
    fn ties_keep_filtered_input_order() {
        let records = vec![
            structure("first", "C", 8.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
            structure("second", "A", 8.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
            structure("third", "B", 8.0, 1.0, "100μm", BarrierLevel::Mid, false, false),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let rows = apply(&records, &view_sorted_by(SortKey::Otr, direction)).unwrap();
            assert_eq!(
                rows.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
                vec!["first", "second", "third"],
                "equal keys must preserve input order ({direction:?})"
            );
        }
    }

    #[test]
    fn descending_is_the_exact_reverse_on_distinct_keys() {
        let records = vec![
            structure("a", "A", 8.0, 12.0, "100μm", BarrierLevel::Mid, false, false),
            structure("b", "B", 1.0, 0.5, "120μm", BarrierLevel::High, false, false),
            structure("c", "C", 2000.0, 15.0, "60μm", BarrierLevel::Low, false, false),
            structure("d", "D", 0.5, 0.3, "180μm", BarrierLevel::Ultra, false, false),
        ];
        for key in [SortKey::Name, SortKey::Otr, SortKey::Wvtr, SortKey::BarrierLevel, SortKey::Thickness] {
            let asc = apply_indices(&records, &view_sorted_by(key, SortDirection::Ascending)).unwrap();
            let desc = apply_indices(&records, &view_sorted_by(key, SortDirection::Descending)).unwrap();
            let mut reversed = asc.clone();
            reversed.reverse();
            assert_eq!(desc, reversed, "direction mismatch for {key:?}");
        }
    }

    #[test]
    fn apply_does_not_mutate_the_source() {
        let records = vec![
            structure("z", "Z", 9.0, 9.0, "150μm", BarrierLevel::Ultra, false, false),
            structure("a", "A", 1.0, 1.0, "60μm", BarrierLevel::Low, false, false),
        ];
        let before = records.clone();
        let _ = apply(&records, &view_sorted_by(SortKey::Name, SortDirection::Ascending)).unwrap();
        assert_eq!(records, before);
    }

    #[test]
    fn search_matches_name_feature_and_tags() {
        let mut records = vec![
            structure("a", "Kraft VMPET", 1.0, 1.0, "150μm", BarrierLevel::High, false, true),
            structure("b", "PET Duplex", 8.0, 12.0, "100μm", BarrierLevel::Mid, true, false),
        ];
        records[1].best_for = vec!["granola".to_string()];

        let mut view = ViewState::default();
        view.search = "vmpet".to_string();
        assert_eq!(apply(&records, &view).unwrap()[0].id, "a");

        view.search = "GRANOLA".to_string();
        assert_eq!(apply(&records, &view).unwrap()[0].id, "b");

        view.search = "  ".to_string();
        assert_eq!(apply(&records, &view).unwrap().len(), 2);
    }

    #[test]
    fn sort_by_toggles_direction_on_repeated_key() {
        let mut view = ViewState::default();
        view.sort_by(SortKey::Otr);
        assert_eq!((view.sort_key, view.direction), (SortKey::Otr, SortDirection::Ascending));
        view.sort_by(SortKey::Otr);
        assert_eq!(view.direction, SortDirection::Descending);
        view.sort_by(SortKey::Name);
        assert_eq!((view.sort_key, view.direction), (SortKey::Name, SortDirection::Ascending));
    }

    #[test]
    fn clear_keeps_the_category_pin() {
        let mut filters = FilterSelection {
            category: Some(Category::Compostable),
            has_window: Some(true),
            has_kraft: Some(false),
            barrier_level: Some(BarrierLevel::High),
        };
        assert_eq!(filters.active_count(), 3);
        filters.clear();
        assert_eq!(filters.active_count(), 0);
        assert_eq!(filters.category, Some(Category::Compostable));
    }

    #[test]
    fn cached_view_recomputes_only_on_change() {
        let records = vec![
            structure("a", "A", 1.0, 1.0, "100μm", BarrierLevel::Low, false, false),
            structure("b", "B", 2.0, 2.0, "120μm", BarrierLevel::Mid, false, false),
        ];
        let mut view = ViewState::default();
        let mut cache = CachedView::default();

        let first = cache.rows(&records, &view).unwrap().to_vec();
        assert_eq!(cache.recomputes(), 1);

        // Same source, same state: served from cache
        let second = cache.rows(&records, &view).unwrap().to_vec();
        assert_eq!(cache.recomputes(), 1);
        assert_eq!(first, second);

        // State change recomputes
        view.sort_by(SortKey::Otr);
        cache.rows(&records, &view).unwrap();
        assert_eq!(cache.recomputes(), 2);

        // Source identity change recomputes
        let swapped = records.clone();
        cache.rows(&swapped, &view).unwrap();
        assert_eq!(cache.recomputes(), 3);
    }

    fn record_strategy() -> impl Strategy<Value = MaterialStructure> {
        (
            "[a-d]{1,3}",
            0u32..2000,
            0u32..100,
            20u32..200,
            0usize..4,
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(name, otr, wvtr, microns, level, has_window, has_kraft)| {
                let barrier_level = BarrierLevel::all()[level];
                structure(
                    &format!("{name}-{otr}-{wvtr}-{microns}"),
                    &name,
                    f64::from(otr),
                    f64::from(wvtr),
                    &format!("{microns}μm"),
                    barrier_level,
                    has_window,
                    has_kraft,
                )
            })
    }

    fn view_strategy() -> impl Strategy<Value = ViewState> {
        (
            prop_oneof![
                Just(SortKey::Name),
                Just(SortKey::Otr),
                Just(SortKey::Wvtr),
                Just(SortKey::BarrierLevel),
                Just(SortKey::Thickness),
            ],
            prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)],
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(0usize..4),
        )
            .prop_map(|(sort_key, direction, has_window, has_kraft, level)| ViewState {
                sort_key,
                direction,
                filters: FilterSelection {
                    category: None,
                    has_window,
                    has_kraft,
                    barrier_level: level.map(|l| BarrierLevel::all()[l]),
                },
                search: String::new(),
            })
    }

    fn sort_value(s: &MaterialStructure, key: SortKey) -> f64 {
        match key {
            SortKey::Otr => s.otr,
            SortKey::Wvtr => s.wvtr,
            SortKey::BarrierLevel => f64::from(s.barrier_level.rank()),
            SortKey::Thickness => f64::from(s.thickness_microns().unwrap()),
            SortKey::Name => unreachable!("name compares as a string"),
        }
    }

    proptest! {
        #[test]
        fn view_is_a_correctly_filtered_and_ordered_subset(
            records in proptest::collection::vec(record_strategy(), 0..24),
            view in view_strategy(),
        ) {
            let rows = apply_indices(&records, &view).unwrap();

            // No record is lost, invented, or duplicated
            let mut seen = std::collections::HashSet::new();
            for &idx in &rows {
                prop_assert!(idx < records.len());
                prop_assert!(seen.insert(idx));
            }
            for (idx, s) in records.iter().enumerate() {
                prop_assert_eq!(view.filters.matches(s), rows.contains(&idx));
            }

            // Adjacent output pairs respect the active (key, direction)
            for pair in rows.windows(2) {
                let (x, y) = (&records[pair[0]], &records[pair[1]]);
                let ord = match view.sort_key {
                    SortKey::Name => x.name.cmp(&y.name),
                    key => sort_value(x, key).total_cmp(&sort_value(y, key)),
                };
                prop_assert_ne!(view.direction.order(ord), Ordering::Greater);
            }

            // Idempotence
            prop_assert_eq!(apply_indices(&records, &view).unwrap(), rows);
        }
    }
}
