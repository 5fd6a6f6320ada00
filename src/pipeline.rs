//! Filter -> sort -> paginate derivation of the visible listings.

use std::fmt;
use std::str::FromStr;

use crate::errors::ListingError;
use crate::models::{Property, PropertyStatus};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PropertyStatus),
}

impl StatusFilter {
    /// Options in the order the filter menu lists them
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(PropertyStatus::Available),
        StatusFilter::Only(PropertyStatus::Sold),
        StatusFilter::Only(PropertyStatus::UnderContract),
    ];

    pub fn accepts(self, property: &Property) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => property.status == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<PropertyStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| ListingError::InvalidLabel {
                kind: "status filter",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    None,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    pub const OPTIONS: [SortOrder; 3] = [
        SortOrder::None,
        SortOrder::PriceLowToHigh,
        SortOrder::PriceHighToLow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::None => "None",
            SortOrder::PriceLowToHigh => "Price: Low to High",
            SortOrder::PriceHighToLow => "Price: High to Low",
        }
    }

    fn apply(self, listings: &mut [&Property]) {
        match self {
            SortOrder::None => {}
            SortOrder::PriceLowToHigh => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHighToLow => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = ListingError;

    /// Accepts the menu labels plus the short forms `asc`/`desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        match wanted.to_ascii_lowercase().as_str() {
            "asc" | "low" => return Ok(SortOrder::PriceLowToHigh),
            "desc" | "high" => return Ok(SortOrder::PriceHighToLow),
            _ => {}
        }
        Self::OPTIONS
            .into_iter()
            .find(|order| order.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ListingError::InvalidLabel {
                kind: "sort order",
                value: s.to_string(),
            })
    }
}

/// Filtered, sorted listings plus the slice for one page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage<'a> {
    pub items: Vec<&'a Property>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Number of listings after filtering, before pagination
    pub total_count: usize,
}

impl ListingPage<'_> {
    /// Pagination controls only appear when there is more than one page's worth
    pub fn show_pagination(&self) -> bool {
        self.total_count > PAGE_SIZE
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Transient selections driving the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingView {
    filter: StatusFilter,
    sort: SortOrder,
    current_page: usize,
}

impl Default for ListingView {
    fn default() -> Self {
        Self {
            filter: StatusFilter::All,
            sort: SortOrder::None,
            current_page: 1,
        }
    }
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View with the given selections opened on `page`.
    /// `None` when `page` is past the last page of `listings`; page 1 always exists.
    pub fn open(
        filter: StatusFilter,
        sort: SortOrder,
        page: usize,
        listings: &[Property],
    ) -> Option<Self> {
        let mut view = Self::new();
        view.set_filter(filter);
        view.set_sort(sort);
        if page == 1 {
            return Some(view);
        }
        let total_pages = view.apply(listings).total_pages;
        view.go_to_page(page, total_pages).then_some(view)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changing the filter returns to the first page
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    /// Changing the sort returns to the first page
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.current_page = 1;
    }

    /// Move to `page` if it exists for `total_pages`; returns whether the page changed
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.current_page + 1, total_pages)
    }

    pub fn previous_page(&mut self, total_pages: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page, total_pages),
            None => false,
        }
    }

    /// Run filter, sort and paginate over the full listing set
    pub fn apply<'a>(&self, listings: &'a [Property]) -> ListingPage<'a> {
        let mut visible: Vec<&Property> = listings
            .iter()
            .filter(|p| !p.is_deleted && self.filter.accepts(p))
            .collect();
        self.sort.apply(&mut visible);

        let total_count = visible.len();
        let total_pages = total_count.div_ceil(PAGE_SIZE);
        let start = self.current_page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        let items = visible.into_iter().skip(start).take(PAGE_SIZE).collect();

        ListingPage {
            items,
            current_page: self.current_page,
            total_pages,
            total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatePropertyInput, PropertyId};
    use chrono::Utc;
    use rstest::rstest;

    fn listing(id: PropertyId, price: f64, status: PropertyStatus) -> Property {
        Property::from_input(
            id,
            CreatePropertyInput {
                name: format!("Listing {id}"),
                address: format!("{id} Test Avenue"),
                price,
                description: "Test listing".to_string(),
                status,
                image: "https://example.com/p.jpg".to_string(),
            },
            Utc::now(),
        )
    }

    fn many(count: PropertyId) -> Vec<Property> {
        (1..=count)
            .map(|id| listing(id, 100_000.0 * id as f64, PropertyStatus::Available))
            .collect()
    }

    fn ids(page: &ListingPage<'_>) -> Vec<PropertyId> {
        page.items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn fifteen_listings_make_two_pages() {
        let listings = many(15);
        let mut view = ListingView::new();

        let first = view.apply(&listings);
        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 2);
        assert!(first.show_pagination());
        assert!(first.has_next() && !first.has_previous());

        assert!(view.next_page(first.total_pages));
        let second = view.apply(&listings);
        assert_eq!(ids(&second), (11..=15).collect::<Vec<_>>());
        assert!(!second.has_next() && second.has_previous());
    }

    #[test]
    fn filter_keeps_only_matching_status() {
        let listings = vec![
            listing(1, 500_000.0, PropertyStatus::Available),
            listing(2, 600_000.0, PropertyStatus::Sold),
            listing(3, 700_000.0, PropertyStatus::UnderContract),
        ];
        let mut view = ListingView::new();
        view.set_filter(StatusFilter::Only(PropertyStatus::Available));

        let page = view.apply(&listings);
        assert_eq!(ids(&page), vec![1]);
        assert_eq!(page.total_count, 1);
        assert!(!page.show_pagination());
    }

    #[rstest]
    #[case(SortOrder::PriceLowToHigh, vec![300_000.0, 500_000.0, 750_000.0])]
    #[case(SortOrder::PriceHighToLow, vec![750_000.0, 500_000.0, 300_000.0])]
    #[case(SortOrder::None, vec![500_000.0, 750_000.0, 300_000.0])]
    fn sorts_by_price(#[case] order: SortOrder, #[case] expected: Vec<f64>) {
        let listings = vec![
            listing(1, 500_000.0, PropertyStatus::Available),
            listing(2, 750_000.0, PropertyStatus::Sold),
            listing(3, 300_000.0, PropertyStatus::Available),
        ];
        let mut view = ListingView::new();
        view.set_sort(order);

        let prices: Vec<f64> = view.apply(&listings).items.iter().map(|p| p.price).collect();
        assert_eq!(prices, expected);
    }

    #[test]
    fn deleted_listings_never_show() {
        let mut listings = many(3);
        listings[1].is_deleted = true;

        let page = ListingView::new().apply(&listings);
        assert_eq!(ids(&page), vec![1, 3]);
    }

    #[test]
    fn changing_filter_or_sort_resets_page() {
        let listings = many(25);
        let mut view = ListingView::new();
        assert!(view.go_to_page(3, 3));

        view.set_sort(SortOrder::PriceHighToLow);
        assert_eq!(view.current_page(), 1);

        assert!(view.go_to_page(2, 3));
        view.set_filter(StatusFilter::All);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.apply(&listings).items[0].id, 25);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut view = ListingView::new();
        assert!(!view.go_to_page(0, 2));
        assert!(!view.go_to_page(3, 2));
        assert!(!view.previous_page(2));
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn open_lands_on_requested_page_or_refuses() {
        let listings = many(15);

        let view = ListingView::open(StatusFilter::All, SortOrder::PriceHighToLow, 2, &listings)
            .unwrap();
        assert_eq!(ids(&view.apply(&listings)), vec![5, 4, 3, 2, 1]);

        assert!(ListingView::open(StatusFilter::All, SortOrder::None, 3, &listings).is_none());
        assert!(ListingView::open(StatusFilter::All, SortOrder::None, 0, &listings).is_none());
        assert!(ListingView::open(StatusFilter::All, SortOrder::None, 1, &[]).is_some());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let page = ListingView::new().apply(&[]);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.show_pagination());
    }

    #[test]
    fn labels_parse_back() {
        for filter in StatusFilter::OPTIONS {
            assert_eq!(filter.to_string().parse::<StatusFilter>().unwrap(), filter);
        }
        for order in SortOrder::OPTIONS {
            assert_eq!(order.to_string().parse::<SortOrder>().unwrap(), order);
        }
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::PriceHighToLow);
        assert!("cheapest".parse::<SortOrder>().is_err());
        assert!("Pending".parse::<StatusFilter>().is_err());
    }
}
