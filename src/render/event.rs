//! Rendering of one row-change event into one line of output.

use super::RenderDirection;
use super::literal::format_literal;
use super::statement::{StatementColumn, build_statement};
use crate::encoding::{ColumnValueDecoder, DatumDecoder};
use crate::errors::RenderError;
use crate::syncer::EventErrorPolicy;
use crate::record::{ColumnRecord, EventKind, RowChangeEvent};

/// What happened to an event handed to [`EventRenderer::render_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The statement was written.
    Rendered,
    /// The event was abandoned and only its line terminator was written.
    Skipped(RenderError),
}

/// Renders row-change events in a fixed direction.
#[derive(Debug, Clone, Default)]
pub struct EventRenderer<D = DatumDecoder> {
    direction: RenderDirection,
    policy: EventErrorPolicy,
    decoder: D,
}

impl EventRenderer {
    /// Creates a renderer using the built-in datum decoder.
    #[must_use]
    pub fn new(direction: RenderDirection) -> Self {
        Self::with_decoder(direction, DatumDecoder)
    }
}

impl<D: ColumnValueDecoder> EventRenderer<D> {
    /// Creates a renderer decoding column values with `decoder`.
    #[must_use]
    pub fn with_decoder(direction: RenderDirection, decoder: D) -> Self {
        Self {
            direction,
            policy: EventErrorPolicy::default(),
            decoder,
        }
    }

    /// Sets what happens when an event fails to render.
    #[must_use]
    pub fn with_policy(mut self, policy: EventErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the render direction.
    #[must_use]
    pub fn direction(&self) -> RenderDirection {
        self.direction
    }

    /// Returns the event error policy.
    #[must_use]
    pub fn policy(&self) -> EventErrorPolicy {
        self.policy
    }

    fn literal(&self, column: &ColumnRecord, encoded: &[u8]) -> Result<String, RenderError> {
        let scalar = self
            .decoder
            .decode(column.column_type(), encoded)
            .map_err(|source| RenderError::Decode {
                column: column.name().to_owned(),
                source,
            })?;
        format_literal(&scalar, column.column_type()).map_err(|source| RenderError::Literal {
            column: column.name().to_owned(),
            source,
        })
    }

    /// Renders the statement text of one event, without a line terminator.
    ///
    /// Every column is decoded and formatted before any text is assembled,
    /// so a failure never leaves a partial statement behind.
    ///
    /// # Errors
    ///
    /// * `EmptyRow` - If the event has no columns.
    /// * `MissingPreImage` - If an update column has no previous value.
    /// * `Decode` / `Literal` - If a column value cannot be decoded or formatted.
    pub fn render(&self, event: &RowChangeEvent) -> Result<String, RenderError> {
        if event.columns().is_empty() {
            return Err(RenderError::EmptyRow);
        }

        let mut images = Vec::with_capacity(event.columns().len());
        for column in event.columns() {
            let current = self.literal(column, column.current_value())?;
            let previous = match event.kind() {
                EventKind::Update => {
                    let encoded =
                        column
                            .previous_value()
                            .ok_or_else(|| RenderError::MissingPreImage {
                                column: column.name().to_owned(),
                            })?;
                    Some(self.literal(column, encoded)?)
                }
                EventKind::Insert | EventKind::Delete => None,
            };
            images.push((current, previous));
        }

        let columns: Vec<StatementColumn<'_>> = event
            .columns()
            .iter()
            .zip(&images)
            .map(|(column, (current, previous))| StatementColumn {
                name: column.name(),
                current,
                previous: previous.as_deref(),
            })
            .collect();

        Ok(build_statement(
            event.schema_name(),
            event.table_name(),
            &columns,
            event.kind(),
            self.direction,
        ))
    }

    /// Appends the rendered event and its line terminator to `out`.
    ///
    /// Under [`EventErrorPolicy::Continue`] a failed event is logged, only the
    /// line terminator is written, and the failure is returned as
    /// [`EventOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// Under [`EventErrorPolicy::Abort`], returns the render failure and
    /// leaves `out` untouched.
    pub fn render_line(
        &self,
        event: &RowChangeEvent,
        out: &mut String,
    ) -> Result<EventOutcome, RenderError> {
        let outcome = match self.render(event) {
            Ok(statement) => {
                out.push_str(&statement);
                EventOutcome::Rendered
            }
            Err(err) => match self.policy {
                EventErrorPolicy::Abort => return Err(err),
                EventErrorPolicy::Continue => {
                    tracing::error!(
                        schema = event.schema_name(),
                        table = event.table_name(),
                        kind = %event.kind(),
                        direction = %self.direction,
                        error = %err,
                        "failed to render row-change event, skipping it"
                    );
                    EventOutcome::Skipped(err)
                }
            },
        };
        out.push('\n');
        Ok(outcome)
    }
}
