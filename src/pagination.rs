//! Page-link bar model
//!
//! Builds the link sequence a classic pagination widget shows:
//! `« < [pages] > »`. The numbered window is centred on the active page and
//! widened toward whichever side has room. Frontends only render the links
//! and hand activated targets back to the table.

use crate::filter::page_count;

/// Role of a link in the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    First,
    Prev,
    Page,
    Next,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub kind: LinkKind,
    pub label: String,
    /// Page the link navigates to
    pub target: usize,
    pub active: bool,
    pub disabled: bool,
}

/// Link sequence for one render of the bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    links: Vec<PageLink>,
    total_pages: usize,
}

impl PaginationBar {
    pub const FIRST_LABEL: &'static str = "\u{00AB}";
    pub const PREV_LABEL: &'static str = "<";
    pub const NEXT_LABEL: &'static str = ">";
    pub const LAST_LABEL: &'static str = "\u{00BB}";

    /// Build the bar for `total_items` split into pages of `items_per_page`,
    /// showing at most `page_range` numbered links.
    pub fn build(
        active_page: usize,
        items_per_page: usize,
        total_items: usize,
        page_range: usize,
    ) -> Self {
        let total_pages = page_count(total_items, items_per_page) as i64;
        let length = page_range as i64;

        let mut current = (active_page as i64).max(1);
        if current > total_pages {
            current = total_pages;
        }

        let half = length / 2;
        let mut first = (current - half).max(1);
        let mut last = (current + half).min(total_pages);

        if last - first + 1 < length {
            if (current as f64) < (total_pages as f64) / 2.0 {
                last = (last + (length - (last - first))).min(total_pages);
            } else {
                first = (first - (length - (last - first))).max(1);
            }
        }
        if last - first + 1 > length {
            if (current as f64) > (total_pages as f64) / 2.0 {
                first += 1;
            } else {
                last -= 1;
            }
        }

        let has_previous = current > 1;
        let has_next = current < total_pages;
        let total = total_pages.max(0) as usize;

        let mut links = Vec::with_capacity(page_range + 4);
        links.push(PageLink {
            kind: LinkKind::First,
            label: Self::FIRST_LABEL.to_string(),
            target: 1,
            active: false,
            disabled: !has_previous,
        });
        links.push(PageLink {
            kind: LinkKind::Prev,
            label: Self::PREV_LABEL.to_string(),
            target: if has_previous { (current - 1) as usize } else { 1 },
            active: false,
            disabled: !has_previous,
        });
        for page in first..=last {
            let page = page as usize;
            links.push(PageLink {
                kind: LinkKind::Page,
                label: page.to_string(),
                target: page,
                active: page == active_page,
                disabled: false,
            });
        }
        links.push(PageLink {
            kind: LinkKind::Next,
            label: Self::NEXT_LABEL.to_string(),
            target: if has_next { (current + 1) as usize } else { total },
            active: false,
            disabled: !has_next,
        });
        links.push(PageLink {
            kind: LinkKind::Last,
            label: Self::LAST_LABEL.to_string(),
            target: total,
            active: false,
            disabled: !has_next,
        });

        Self {
            links,
            total_pages: total,
        }
    }

    pub fn links(&self) -> &[PageLink] {
        &self.links
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Numbered pages shown in the bar
    pub fn pages(&self) -> Vec<usize> {
        self.links
            .iter()
            .filter(|l| l.kind == LinkKind::Page)
            .map(|l| l.target)
            .collect()
    }

    /// Target page of the link at `index`, or `None` if it is disabled or missing
    pub fn activate(&self, index: usize) -> Option<usize> {
        self.links
            .get(index)
            .filter(|l| !l.disabled)
            .map(|l| l.target)
    }

    /// Target of the first enabled link of `kind`
    pub fn target_of(&self, kind: LinkKind) -> Option<usize> {
        self.links
            .iter()
            .find(|l| l.kind == kind && !l.disabled)
            .map(|l| l.target)
    }

    /// Index of the active numbered link, used to park a link cursor
    pub fn active_index(&self) -> Option<usize> {
        self.links.iter().position(|l| l.active)
    }

    /// Render the bar as one line of text, active page in brackets
    pub fn to_line(&self) -> String {
        self.links
            .iter()
            .map(|l| {
                if l.active {
                    format!("[{}]", l.label)
                } else {
                    l.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 20, vec![1, 2, 3, 4])]
    #[case(1, 100, vec![1, 2, 3, 4, 5])]
    #[case(10, 100, vec![8, 9, 10, 11, 12])]
    #[case(20, 100, vec![16, 17, 18, 19, 20])]
    #[case(19, 100, vec![16, 17, 18, 19, 20])]
    #[case(2, 100, vec![1, 2, 3, 4, 5])]
    #[case(3, 30, vec![1, 2, 3, 4, 5])]
    fn page_window_is_centred_and_clamped(
        #[case] active: usize,
        #[case] total_items: usize,
        #[case] expected: Vec<usize>,
    ) {
        let bar = PaginationBar::build(active, 5, total_items, 5);
        assert_eq!(bar.pages(), expected);
    }

    #[test]
    fn navigation_links_surround_pages() {
        let bar = PaginationBar::build(2, 5, 20, 5);
        let kinds: Vec<LinkKind> = bar.links().iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LinkKind::First,
                LinkKind::Prev,
                LinkKind::Page,
                LinkKind::Page,
                LinkKind::Page,
                LinkKind::Page,
                LinkKind::Next,
                LinkKind::Last,
            ]
        );
        assert_eq!(bar.target_of(LinkKind::Prev), Some(1));
        assert_eq!(bar.target_of(LinkKind::Next), Some(3));
        assert_eq!(bar.target_of(LinkKind::Last), Some(4));
        assert_eq!(bar.to_line(), "\u{00AB} < 1 [2] 3 4 > \u{00BB}");
    }

    #[test]
    fn first_page_disables_backward_links() {
        let bar = PaginationBar::build(1, 5, 20, 5);
        assert_eq!(bar.activate(0), None);
        assert_eq!(bar.activate(1), None);
        assert_eq!(bar.activate(2), Some(1));
        assert_eq!(bar.active_index(), Some(2));
    }

    #[test]
    fn last_page_disables_forward_links() {
        let bar = PaginationBar::build(4, 5, 20, 5);
        let len = bar.links().len();
        assert_eq!(bar.activate(len - 1), None);
        assert_eq!(bar.activate(len - 2), None);
        assert_eq!(bar.target_of(LinkKind::Next), None);
    }

    #[test]
    fn active_page_past_the_end_is_clamped_for_links_only() {
        // Page 9 of 4: the window sits at the end, nothing is highlighted
        let bar = PaginationBar::build(9, 5, 20, 5);
        assert_eq!(bar.pages(), vec![1, 2, 3, 4]);
        assert_eq!(bar.active_index(), None);
        assert_eq!(bar.target_of(LinkKind::Prev), Some(3));
    }

    #[test]
    fn empty_catalogue_has_no_pages() {
        let bar = PaginationBar::build(1, 5, 0, 5);
        assert!(bar.pages().is_empty());
        assert_eq!(bar.total_pages(), 0);
        assert!(bar.links().iter().all(|l| l.disabled));
    }

    #[test]
    fn out_of_range_index_activates_nothing() {
        let bar = PaginationBar::build(1, 5, 20, 5);
        assert_eq!(bar.activate(99), None);
    }
}
