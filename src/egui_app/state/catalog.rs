//! UI state for the catalog tab: filter inputs, table rows, pagination.

use crate::bacteria::PageState;

/// Filterable, paginated view over the bacteria catalog.
#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    /// Rows for the page currently shown.
    pub rows: Vec<BacteriaRowView>,
    pub page: PageState,
    /// Editable filter inputs. They only take effect on apply.
    pub filters: FilterInputs,
    pub loading: bool,
    /// Load failure shown as a banner above the table.
    pub error: Option<String>,
    /// Row index whose detail panel is open.
    pub selected: Option<usize>,
    pub detail: Option<DetailView>,
    pub detail_loading: bool,
}

/// Display values for one table row. Missing traits are already
/// substituted with "Unknown" so the renderer stays dumb.
#[derive(Clone, Debug, PartialEq)]
pub struct BacteriaRowView {
    pub bacteria_id: String,
    pub name: String,
    pub gram_stain: String,
    pub shape: String,
    pub phylum: String,
    pub is_pathogen: Option<bool>,
}

/// Filter form fields as the user typed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterInputs {
    pub search: String,
    pub gram_stain: String,
    pub pathogen: PathogenFilter,
    pub phylum: String,
}

/// Pathogen status filter choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathogenFilter {
    #[default]
    All,
    Pathogenic,
    NonPathogenic,
}

impl PathogenFilter {
    pub fn label(self) -> &'static str {
        match self {
            PathogenFilter::All => "All bacteria",
            PathogenFilter::Pathogenic => "Pathogenic",
            PathogenFilter::NonPathogenic => "Non-pathogenic",
        }
    }

    /// Query flag sent to the gateway. `All` means no constraint.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            PathogenFilter::All => None,
            PathogenFilter::Pathogenic => Some(true),
            PathogenFilter::NonPathogenic => Some(false),
        }
    }
}

/// Label/value pairs backing the record detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

/// One slot in the windowed pagination strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    /// Ellipsis between non-adjacent page numbers.
    Gap,
}

/// Page numbers to offer, windowed around the current page. The first and
/// last pages are always present; at most five numbered slots surround the
/// current page, with gaps standing in for the elided ranges.
pub fn page_links(current: u32, total_pages: u32) -> Vec<PageLink> {
    const WINDOW: u32 = 5;
    const HALF: u32 = WINDOW / 2;
    if total_pages <= WINDOW + 2 {
        return (1..=total_pages).map(PageLink::Page).collect();
    }
    let mut links = vec![PageLink::Page(1)];
    if current > HALF + 2 {
        links.push(PageLink::Gap);
    }
    let mut start = current.saturating_sub(HALF).max(2);
    let mut end = (current + HALF).min(total_pages - 1);
    if current <= HALF + 1 {
        end = WINDOW.min(total_pages - 1);
    }
    if current >= total_pages - HALF {
        start = total_pages.saturating_sub(WINDOW - 1).max(2);
    }
    links.extend((start..=end).map(PageLink::Page));
    if current + HALF + 1 < total_pages {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Page(total_pages));
    links
}
