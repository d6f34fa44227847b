//! # Telemetry: tracing around terminal operations
//!
//! Every terminal operation (`then`, `perform`, `trigger`) runs inside a span
//! carrying the node's id, kind, style and animated flag. Completion is logged
//! at `info`, failures at `warn`, both with the elapsed duration.

use passage_core::TransitionResult;
use passage_core::schematic::TransitionKind;
use std::fmt::Display;
use uuid::Uuid;

/// Identity and configuration of a node, as recorded on its span.
pub(crate) struct SpanFields<'a> {
    pub id: Uuid,
    pub kind: TransitionKind,
    pub style: &'a dyn Display,
    pub animated: bool,
}

impl SpanFields<'_> {
    fn span(&self) -> tracing::Span {
        let kind = kind_label(self.kind);
        match self.kind {
            TransitionKind::Close => tracing::info_span!(
                "close",
                passage.node = %self.id,
                passage.kind = kind,
                passage.style = %self.style,
                passage.animated = self.animated
            ),
            _ => tracing::info_span!(
                "transition",
                passage.node = %self.id,
                passage.kind = kind,
                passage.style = %self.style,
                passage.animated = self.animated
            ),
        }
    }
}

pub(crate) fn kind_label(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::Storyboard => "storyboard",
        TransitionKind::Segue => "segue",
        TransitionKind::Close => "close",
    }
}

/// Run `body` inside the node's span and log its outcome.
pub(crate) fn traced<R>(
    fields: SpanFields<'_>,
    body: impl FnOnce() -> TransitionResult<R>,
) -> TransitionResult<R> {
    let span = fields.span();
    let _entered = span.enter();

    tracing::debug!("Executing transition node");
    let start = std::time::Instant::now();
    let result = body();
    let duration = start.elapsed();

    match &result {
        Ok(_) => tracing::info!(?duration, "Transition completed"),
        Err(error) => tracing::warn!(%error, ?duration, "Transition failed"),
    }
    result
}
