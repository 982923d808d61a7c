//! Tag scanning.

use crate::Settings;

/// A candidate directive tag found in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagMatch {
    /// Tag name that matched.
    pub name: String,
    /// Byte offset of the opening `<`.
    pub position: usize,
    /// Byte offset just past the opening sequence (`<name `); attribute
    /// text starts here.
    pub tag_start: usize,
}

/// Locates the next directive tag at or after a byte offset.
pub trait FindTag: Send + Sync {
    /// Find the next tag in `text` starting the search at `from`.
    fn find_tag(&self, text: &str, from: usize, settings: &Settings) -> Option<TagMatch>;
}

impl<F> FindTag for F
where
    F: Fn(&str, usize, &Settings) -> Option<TagMatch> + Send + Sync,
{
    fn find_tag(&self, text: &str, from: usize, settings: &Settings) -> Option<TagMatch> {
        self(text, from, settings)
    }
}

/// Built-in scanner: the leftmost literal `<name ` over every configured
/// `directiveTag` name.
///
/// A tag name with no following space (`<link>`) never matches. On a tie
/// the name configured first wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFindTag;

impl FindTag for DefaultFindTag {
    fn find_tag(&self, text: &str, from: usize, settings: &Settings) -> Option<TagMatch> {
        let haystack = text.get(from..)?;
        let mut best: Option<TagMatch> = None;

        for name in &settings.options.directive_tag {
            if name.is_empty() {
                continue;
            }
            let opening = format!("<{name} ");
            let Some(offset) = haystack.find(&opening) else {
                continue;
            };
            let position = from + offset;
            if best.as_ref().is_none_or(|b| position < b.position) {
                best = Some(TagMatch {
                    name: name.clone(),
                    position,
                    tag_start: position + opening.len(),
                });
            }
        }

        best
    }
}
