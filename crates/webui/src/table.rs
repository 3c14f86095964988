//! Search, sort, pagination and selection of the generic CRUD table.

use crate::model::{Lookups, Resource};
use std::{collections::BTreeSet, rc::Rc};
use yew::Reducible;

pub const PAGE_SIZES: [usize; 5] = [10, 15, 20, 25, 30];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub column: usize,
    pub ascending: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    pub search: String,
    pub sort: Option<Sort>,
    /// Zero based.
    pub page: usize,
    pub per_page: usize,
    /// Ids of the selected rows.
    pub selected: BTreeSet<i64>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            per_page: PAGE_SIZES[0],
            selected: BTreeSet::new(),
        }
    }
}

#[derive(Debug)]
pub enum TableAction {
    Search(String),
    /// Clicking the sorted column again flips the direction.
    Sort(usize),
    Page(usize),
    PerPage(usize),
    ToggleRow(i64),
    /// Selects the given ids, or clears them when all are already selected.
    TogglePage(Vec<i64>),
    ClearSelection,
}

impl Reducible for TableState {
    type Action = TableAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TableAction::Search(search) => {
                next.search = search;
                next.page = 0;
            }
            TableAction::Sort(column) => {
                next.sort = Some(match self.sort {
                    Some(sort) if sort.column == column => Sort {
                        column,
                        ascending: !sort.ascending,
                    },
                    _ => Sort {
                        column,
                        ascending: true,
                    },
                });
            }
            TableAction::Page(page) => next.page = page,
            TableAction::PerPage(per_page) => {
                next.per_page = per_page.max(1);
                next.page = 0;
            }
            TableAction::ToggleRow(id) => {
                if !next.selected.remove(&id) {
                    next.selected.insert(id);
                }
            }
            TableAction::TogglePage(ids) => {
                if ids.iter().all(|id| next.selected.contains(id)) {
                    for id in &ids {
                        next.selected.remove(id);
                    }
                } else {
                    next.selected.extend(ids);
                }
            }
            TableAction::ClearSelection => next.selected.clear(),
        }
        next.into()
    }
}

/// One page of filtered, sorted rows.
#[derive(Debug, PartialEq)]
pub struct TableView<'a, R> {
    pub rows: Vec<&'a R>,
    /// Rows matching the search, over all pages.
    pub total: usize,
    /// Zero based, clamped to the last page.
    pub page: usize,
    pub page_count: usize,
}

impl TableState {
    pub fn view<'a, R: Resource>(&self, items: &'a [R], lookups: &Lookups) -> TableView<'a, R> {
        let mut rows: Vec<&R> = items
            .iter()
            .filter(|item| item.matches(&self.search, lookups))
            .collect();
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = a.cell(sort.column, lookups).compare(&b.cell(sort.column, lookups));
                if sort.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        let total = rows.len();
        let page_count = total.div_ceil(self.per_page).max(1);
        let page = self.page.min(page_count - 1);
        let rows = rows
            .into_iter()
            .skip(page * self.per_page)
            .take(self.per_page)
            .collect();
        TableView {
            rows,
            total,
            page,
            page_count,
        }
    }

    /// Selected rows still present in `items`, in list order.
    pub fn selected_items<'a, R: Resource>(&self, items: &'a [R]) -> Vec<&'a R> {
        items
            .iter()
            .filter(|item| self.selected.contains(&item.id()))
            .collect()
    }
}
