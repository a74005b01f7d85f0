//! Reply-tree flattening.
//!
//! A fetched conversation is a tree: one root cast whose direct replies carry
//! their own replies, and so on. Thread screens need two flat views of it:
//!
//! - every cast in depth-first pre-order (root first), for the ancestor feed;
//! - one section per cast that has replies, holding that cast as header and
//!   its direct replies as items, for the threaded reply list.
//!
//! Both views borrow from the tree. Nothing is cloned and the tree is never
//! mutated, so flattening the same tree twice yields equal output.
//!
//! # Example
//!
//! ```
//! use castview::conversation::flatten;
//! use castview::Cast;
//!
//! let root = Cast::new("r").with_replies(vec![
//!     Cast::new("a").with_replies(vec![Cast::new("c")]),
//!     Cast::new("b"),
//! ]);
//!
//! let flat = flatten(std::slice::from_ref(&root));
//! let order: Vec<&str> = flat.casts.iter().map(|c| c.cast.hash.as_str()).collect();
//! assert_eq!(order, ["r", "a", "c", "b"]);
//! assert_eq!(flat.sections.len(), 2);
//! assert_eq!(flat.sections[1].root_index, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::Cast;

/// How the flattener assigns nesting depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthMode {
    /// Derive depth from the traversal: roots are 0, replies are parent + 1.
    ///
    /// Upstream `depth` labels that disagree are counted in
    /// [`FlattenedConversation::depth_mismatches`].
    #[default]
    Recompute,

    /// Report the `depth` field supplied by the upstream payload.
    Trust,
}

/// A cast placed in the flattened conversation, with its nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlatCast<'a> {
    pub cast: &'a Cast,
    pub depth: u32,
}

/// A cast with at least one reply, grouped with its direct replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSection<'a> {
    pub header: FlatCast<'a>,

    /// The header's direct replies in their original order.
    pub items: Vec<FlatCast<'a>>,

    /// Position of `header` within [`FlattenedConversation::casts`].
    pub root_index: usize,
}

/// Flat views over a conversation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedConversation<'a> {
    /// Every reachable cast, depth-first pre-order.
    pub casts: Vec<FlatCast<'a>>,

    /// One section per cast with replies, in header visitation order.
    pub sections: Vec<ConversationSection<'a>>,

    /// Casts whose upstream depth disagreed with the recomputed one.
    #[serde(skip)]
    pub depth_mismatches: usize,
}

impl<'a> FlattenedConversation<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.casts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.casts.len()
    }

    /// The first root cast, if any.
    #[must_use]
    pub fn root(&self) -> Option<&'a Cast> {
        self.casts.first().map(|flat| flat.cast)
    }

    /// Text of the flat-list entry a section header points at.
    ///
    /// Thread screens quote this above the section's replies.
    #[must_use]
    pub fn quote_for(&self, section: &ConversationSection<'a>) -> Option<&'a str> {
        self.casts
            .get(section.root_index)
            .map(|flat| flat.cast.text.as_str())
    }
}

/// Flattens reply trees into [`FlattenedConversation`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationFlattener {
    mode: DepthMode,
}

impl ConversationFlattener {
    #[must_use]
    pub const fn new(mode: DepthMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> DepthMode {
        self.mode
    }

    /// Flattens every tree in `roots`, in order.
    #[must_use]
    pub fn flatten<'a>(&self, roots: &'a [Cast]) -> FlattenedConversation<'a> {
        self.flatten_roots(roots.iter().map(Some))
    }

    /// Flattens a sequence of possibly absent roots.
    ///
    /// Absent roots are skipped, so `[None]` flattens to an empty result.
    ///
    /// The traversal keeps an explicit stack. Replies are pushed in reverse so
    /// they pop in their original order.
    pub fn flatten_roots<'a, I>(&self, roots: I) -> FlattenedConversation<'a>
    where
        I: IntoIterator<Item = Option<&'a Cast>>,
    {
        let roots: Vec<&'a Cast> = roots.into_iter().flatten().collect();
        let _span = tracing::debug_span!("flatten_conversation",
            roots = roots.len(),
            mode = ?self.mode
        )
        .entered();

        let mut flat = FlattenedConversation::default();
        let mut stack: Vec<FlatCast<'a>> = roots
            .iter()
            .rev()
            .map(|&cast| FlatCast {
                cast,
                depth: self.root_depth(cast),
            })
            .collect();

        while let Some(entry) = stack.pop() {
            let FlatCast { cast, depth } = entry;

            if self.mode == DepthMode::Recompute && cast.depth != depth {
                tracing::debug!(
                    hash = %cast.hash,
                    upstream = cast.depth,
                    computed = depth,
                    "upstream depth disagrees with tree position"
                );
                flat.depth_mismatches += 1;
            }

            flat.casts.push(entry);

            if cast.has_replies() {
                let items: Vec<FlatCast<'a>> = cast
                    .direct_replies
                    .iter()
                    .map(|reply| FlatCast {
                        cast: reply,
                        depth: self.reply_depth(reply, depth),
                    })
                    .collect();

                stack.extend(items.iter().rev().copied());
                flat.sections.push(ConversationSection {
                    header: entry,
                    items,
                    root_index: flat.casts.len() - 1,
                });
            }
        }

        tracing::debug!(
            casts = flat.casts.len(),
            sections = flat.sections.len(),
            depth_mismatches = flat.depth_mismatches,
            "conversation flattened"
        );
        flat
    }

    fn root_depth(&self, root: &Cast) -> u32 {
        match self.mode {
            DepthMode::Recompute => 0,
            DepthMode::Trust => root.depth,
        }
    }

    fn reply_depth(&self, reply: &Cast, parent_depth: u32) -> u32 {
        match self.mode {
            DepthMode::Recompute => parent_depth.saturating_add(1),
            DepthMode::Trust => reply.depth,
        }
    }
}

/// Flattens `roots` with the default flattener (recomputed depth).
#[must_use]
pub fn flatten(roots: &[Cast]) -> FlattenedConversation<'_> {
    ConversationFlattener::default().flatten(roots)
}

/// Flattens a single, possibly absent, root with the default flattener.
#[must_use]
pub fn flatten_root(root: Option<&Cast>) -> FlattenedConversation<'_> {
    ConversationFlattener::default().flatten_roots([root])
}
