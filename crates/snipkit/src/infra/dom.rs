//! UI host abstraction
//!
//! This module provides the [`DomHost`] capability trait, covering the few
//! operations the DOM helpers need:
//! - Element lookup by selector
//! - Style read/write
//! - Class membership
//! - Markup insertion
//! - Scrolling and containment
//!
//! The helpers below are direct pass-throughs; they add no logic beyond
//! argument forwarding.

use tracing::{debug, trace};

/// UI host errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Handle does not refer to a live element
    #[error("Not an element: {0}")]
    NotAnElement(String),

    /// Selector matched nothing
    #[error("No element matches selector: {0}")]
    NoMatch(String),

    /// Selector syntax the host cannot handle
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// Requested tree change is not allowed
    #[error("Hierarchy request error: {0}")]
    Hierarchy(String),
}

/// Where `insert_adjacent_html` places markup relative to an element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdjacentPosition {
    /// Before the element itself
    BeforeBegin,
    /// Inside the element, before its first child
    AfterBegin,
    /// Inside the element, after its last child
    BeforeEnd,
    /// After the element itself
    AfterEnd,
}

/// Scrolling animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Core trait for driving a document-like UI host
///
/// Implementations decide what an element handle is; the helpers only copy
/// handles around.
pub trait DomHost {
    /// Element handle
    type Element: Copy + Eq + std::fmt::Debug;

    /// First element matching `selector`, in document order
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, DomError>;

    /// Resolved value of a style property (empty string if unset)
    fn computed_style(&self, el: Self::Element, property: &str) -> Result<String, DomError>;

    /// Set an inline style property; an empty value removes it
    fn set_style(&mut self, el: Self::Element, property: &str, value: &str)
    -> Result<(), DomError>;

    fn class_contains(&self, el: Self::Element, class_name: &str) -> Result<bool, DomError>;

    fn class_add(&mut self, el: Self::Element, class_name: &str) -> Result<(), DomError>;

    fn class_remove(&mut self, el: Self::Element, class_name: &str) -> Result<(), DomError>;

    /// Flip class membership, returning whether the class is now present
    fn class_toggle(&mut self, el: Self::Element, class_name: &str) -> Result<bool, DomError> {
        if self.class_contains(el, class_name)? {
            self.class_remove(el, class_name)?;
            Ok(false)
        } else {
            self.class_add(el, class_name)?;
            Ok(true)
        }
    }

    /// Insert raw markup next to or inside `el`
    fn insert_adjacent_html(
        &mut self,
        el: Self::Element,
        position: AdjacentPosition,
        html: &str,
    ) -> Result<(), DomError>;

    fn scroll_into_view(&mut self, el: Self::Element, behavior: ScrollBehavior)
    -> Result<(), DomError>;

    /// Inclusive containment: an element contains itself
    fn contains(&self, parent: Self::Element, child: Self::Element) -> Result<bool, DomError>;

    fn has_window(&self) -> bool;

    fn has_document(&self) -> bool;

    /// Whether the document is currently hidden from the user
    fn is_hidden(&self) -> bool;
}

// =============================================================================
// Pass-through helpers
// =============================================================================

/// Check whether `parent` strictly contains `child`
pub fn element_contains<H: DomHost + ?Sized>(
    host: &H,
    parent: H::Element,
    child: H::Element,
) -> Result<bool, DomError> {
    Ok(parent != child && host.contains(parent, child)?)
}

/// Read a computed style property
pub fn get_style<H: DomHost + ?Sized>(
    host: &H,
    el: H::Element,
    property: &str,
) -> Result<String, DomError> {
    host.computed_style(el, property)
}

/// Set an inline style property
pub fn set_style<H: DomHost + ?Sized>(
    host: &mut H,
    el: H::Element,
    property: &str,
    value: &str,
) -> Result<(), DomError> {
    trace!(?el, property, value, "set_style");
    host.set_style(el, property, value)
}

/// Check whether an element has a class
pub fn has_class<H: DomHost + ?Sized>(
    host: &H,
    el: H::Element,
    class_name: &str,
) -> Result<bool, DomError> {
    host.class_contains(el, class_name)
}

/// Toggle a class, returning whether it is now present
pub fn toggle_class<H: DomHost + ?Sized>(
    host: &mut H,
    el: H::Element,
    class_name: &str,
) -> Result<bool, DomError> {
    let present = host.class_toggle(el, class_name)?;
    trace!(?el, class_name, present, "toggle_class");
    Ok(present)
}

/// Hide every element by setting `display: none`
pub fn hide<H: DomHost + ?Sized>(host: &mut H, elements: &[H::Element]) -> Result<(), DomError> {
    debug!(count = elements.len(), "hide");
    for &el in elements {
        host.set_style(el, "display", "none")?;
    }
    Ok(())
}

/// Show every element by clearing its inline `display`
pub fn show<H: DomHost + ?Sized>(host: &mut H, elements: &[H::Element]) -> Result<(), DomError> {
    debug!(count = elements.len(), "show");
    for &el in elements {
        host.set_style(el, "display", "")?;
    }
    Ok(())
}

/// Insert markup right after the element
pub fn insert_after<H: DomHost + ?Sized>(
    host: &mut H,
    el: H::Element,
    html: &str,
) -> Result<(), DomError> {
    host.insert_adjacent_html(el, AdjacentPosition::AfterEnd, html)
}

/// Insert markup right before the element
pub fn insert_before<H: DomHost + ?Sized>(
    host: &mut H,
    el: H::Element,
    html: &str,
) -> Result<(), DomError> {
    host.insert_adjacent_html(el, AdjacentPosition::BeforeBegin, html)
}

/// Smoothly scroll the first element matching `selector` into view
///
/// # Errors
///
/// Returns [`DomError::NoMatch`] if nothing matches.
pub fn smooth_scroll<H: DomHost + ?Sized>(host: &mut H, selector: &str) -> Result<(), DomError> {
    let el = host
        .query_selector(selector)?
        .ok_or_else(|| DomError::NoMatch(selector.to_string()))?;
    debug!(selector, ?el, "smooth_scroll");
    host.scroll_into_view(el, ScrollBehavior::Smooth)
}

/// Append each item as an `<li>` to the list with id `list_id`
///
/// Items are inserted verbatim, without escaping.
///
/// # Errors
///
/// Returns [`DomError::NoMatch`] if no element has that id.
pub fn array_to_html_list<H, S>(host: &mut H, items: &[S], list_id: &str) -> Result<(), DomError>
where
    H: DomHost + ?Sized,
    S: AsRef<str>,
{
    let selector = format!("#{}", list_id);
    let el = host
        .query_selector(&selector)?
        .ok_or(DomError::NoMatch(selector))?;

    let markup: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", item.as_ref()))
        .collect();
    debug!(list_id, count = items.len(), "array_to_html_list");
    host.insert_adjacent_html(el, AdjacentPosition::BeforeEnd, &markup)
}
