// Copyright (c) 2024 Via Technology Ltd. All Rights Reserved.

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.


//! The edit module contains the `Edit` records of `GeometryBuilder` changes
//! and the `EditLog` that undoes and redoes them.

use super::GeometryBuilder;
use crate::config::Settings;
use crate::error::EditError;
use crate::sphere::PointOnSphere;
use log::debug;

/// A change to the points of a `GeometryBuilder`, holding the points
/// before and after so that it can be reversed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edit {
    Insert {
        index: usize,
        point: PointOnSphere,
    },
    Move {
        index: usize,
        from: PointOnSphere,
        to: PointOnSphere,
        /// Whether the move is an update of a drag, rather than its end.
        is_intermediate: bool,
    },
    Delete {
        index: usize,
        point: PointOnSphere,
    },
}

impl Edit {
    /// The edit that reverses this edit.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::Insert { index, point } => Self::Delete { index, point },
            Self::Move {
                index,
                from,
                to,
                is_intermediate,
            } => Self::Move {
                index,
                from: to,
                to: from,
                is_intermediate,
            },
            Self::Delete { index, point } => Self::Insert { index, point },
        }
    }

    /// The index of the point the edit changes.
    #[must_use]
    pub const fn index(&self) -> usize {
        match *self {
            Self::Insert { index, .. } | Self::Move { index, .. } | Self::Delete { index, .. } => {
                index
            }
        }
    }

    /// Whether the edit is an intermediate move of a drag.
    #[must_use]
    pub const fn is_intermediate(&self) -> bool {
        matches!(
            self,
            Self::Move {
                is_intermediate: true,
                ..
            }
        )
    }

    /// Merge an intermediate move with the next edit of the same point.
    /// returns the move from this edit's start to the next move's end, or
    /// the next edit if it inserts the point where this move left it,
    /// or None if the edits cannot be merged.
    #[must_use]
    pub fn coalesce(&self, next: &Self) -> Option<Self> {
        match (*self, *next) {
            (
                Self::Move {
                    index,
                    to,
                    is_intermediate: true,
                    ..
                },
                Self::Insert {
                    index: next_index,
                    point,
                },
            ) if index == next_index && to == point => Some(*next),
            (
                Self::Move {
                    index,
                    from,
                    is_intermediate: true,
                    ..
                },
                Self::Move {
                    index: next_index,
                    to,
                    is_intermediate,
                    ..
                },
            ) if index == next_index => Some(Self::Move {
                index,
                from,
                to,
                is_intermediate,
            }),
            _ => None,
        }
    }

    /// Apply the edit to a sequence of points.
    /// # Errors
    /// * `IndexOutOfRange` if the edit's index is not in the points.
    /// * `StaleEdit` if the point moved or deleted is not the recorded point.
    pub(crate) fn apply_to(&self, points: &mut Vec<PointOnSphere>) -> Result<(), EditError> {
        let len = points.len();
        let index = self.index();
        let out_of_range = match self {
            Self::Insert { .. } => len < index,
            _ => len <= index,
        };
        if out_of_range {
            return Err(EditError::IndexOutOfRange { index, len });
        }

        match *self {
            Self::Insert { point, .. } => points.insert(index, point),
            Self::Move { from, to, .. } => {
                if points[index] != from {
                    return Err(EditError::StaleEdit { index });
                }
                points[index] = to;
            }
            Self::Delete { point, .. } => {
                if points[index] != point {
                    return Err(EditError::StaleEdit { index });
                }
                points.remove(index);
            }
        }
        Ok(())
    }
}

/// A log of the edits made to a `GeometryBuilder`, to undo and redo them.
///
/// When coalescing, intermediate moves are held as a pending edit and
/// merged into the following move of the same point, so a whole drag is
/// undone in one step.
#[derive(Clone, Debug, PartialEq)]
pub struct EditLog {
    done: Vec<Edit>,
    undone: Vec<Edit>,
    pending: Option<Edit>,
    coalesce_intermediate_moves: bool,
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EditLog {
    /// Construct an empty `EditLog`.
    #[must_use]
    pub const fn new(coalesce_intermediate_moves: bool) -> Self {
        Self {
            done: Vec::new(),
            undone: Vec::new(),
            pending: None,
            coalesce_intermediate_moves,
        }
    }

    /// Construct an empty `EditLog` configured by `Settings`.
    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.coalesce_intermediate_moves)
    }

    /// Record an edit that has been applied to the builder.
    /// Recording an edit discards the edits that could be redone.
    pub fn record(&mut self, edit: Edit) {
        self.undone.clear();
        if !self.coalesce_intermediate_moves {
            if let Edit::Insert { index, point } = edit {
                self.absorb_moves_of_inserted(index, point);
            }
            self.done.push(edit);
            return;
        }

        let edit = match self.pending.take() {
            Some(pending) => pending.coalesce(&edit).unwrap_or_else(|| {
                self.done.push(pending);
                edit
            }),
            None => edit,
        };
        if edit.is_intermediate() {
            self.pending = Some(edit);
        } else {
            self.done.push(edit);
        }
    }

    /// Remove the intermediate moves that dragged an inserted point to
    /// `point`, since they cannot be undone before its insertion.
    fn absorb_moves_of_inserted(&mut self, index: usize, point: PointOnSphere) {
        let mut position = point;
        while let Some(Edit::Move {
            index: move_index,
            from,
            to,
            is_intermediate: true,
        }) = self.done.last().copied()
        {
            if move_index != index || to != position {
                break;
            }
            self.done.pop();
            position = from;
        }
    }

    /// Move a pending intermediate move to the done edits.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.done.push(pending);
        }
    }

    /// Forget a pending intermediate move, e.g. after a drag was cancelled
    /// and the builder restored.
    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    /// Undo the last edit, a pending intermediate move first.
    /// returns the undone edit, or None if there is nothing to undo.
    /// # Errors
    /// As `GeometryBuilder::apply`, the log is unchanged.
    pub fn undo(&mut self, builder: &mut GeometryBuilder) -> Result<Option<Edit>, EditError> {
        if let Some(pending) = self.pending {
            builder.apply_inverse(&pending)?;
            self.pending = None;
            debug!("undo: pending move of point {}", pending.index());
            return Ok(Some(pending));
        }

        match self.done.last().copied() {
            Some(edit) => {
                builder.apply_inverse(&edit)?;
                self.done.pop();
                self.undone.push(edit);
                debug!("undo: {} remain", self.done.len());
                Ok(Some(edit))
            }
            None => Ok(None),
        }
    }

    /// Redo the last undone edit.
    /// returns the redone edit, or None if there is nothing to redo.
    /// # Errors
    /// As `GeometryBuilder::apply`, the log is unchanged.
    pub fn redo(&mut self, builder: &mut GeometryBuilder) -> Result<Option<Edit>, EditError> {
        match self.undone.last().copied() {
            Some(edit) => {
                builder.apply(&edit)?;
                self.undone.pop();
                self.done.push(edit);
                debug!("redo: {} remain", self.undone.len());
                Ok(Some(edit))
            }
            None => Ok(None),
        }
    }

    /// Whether there is an edit to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pending.is_some() || !self.done.is_empty()
    }

    /// Whether there is an edit to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// The edits that can be undone, oldest first, excluding a pending move.
    #[must_use]
    pub fn done_edits(&self) -> &[Edit] {
        &self.done
    }

    /// The pending intermediate move, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&Edit> {
        self.pending.as_ref()
    }

    /// Forget all the edits.
    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
        self.pending = None;
    }
}
