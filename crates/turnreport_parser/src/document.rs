//! Whole-document parsing.
//!
//! Drives a [`BlockCursor`] through the [`Classifier`] and hands each block
//! to the running section parser.

use std::io::BufRead;

use turnreport_debug::Tracer;
use turnreport_foundation::{
    CancelFlag, Error, ErrorContext, Report, ReportSink, Result, ValueSink,
};
use turnreport_lexer::{Block, BlockCursor, BlockReader, DEFAULT_HISTORY, IoLines, LineSource, StrLines};

use crate::classifier::{Classifier, Transition, detect_start};
use crate::section::{SectionKind, SectionSet};
use crate::sections::ActiveSection;

/// Parses turn reports into a [`ReportSink`].
///
/// # Example
///
/// ```
/// use turnreport_parser::{ReportParser, SectionKind, SectionSet};
///
/// let text = "Unclaimed silver: 1200.\n";
/// let report = ReportParser::new()
///     .with_sections(SectionSet::only(&[SectionKind::UnclaimedSilver]))
///     .parse_report(text)
///     .unwrap();
/// assert_eq!(report.unclaimed_silver, Some(1200));
/// ```
#[derive(Clone, Debug)]
pub struct ReportParser {
    sections: SectionSet,
    history: usize,
    cancel: Option<CancelFlag>,
    source: String,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser {
    /// A parser with every section enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: SectionSet::all(),
            history: DEFAULT_HISTORY,
            cancel: None,
            source: "<input>".to_string(),
        }
    }

    /// Restricts parsing to `sections`. Everything else is skipped.
    #[must_use]
    pub fn with_sections(mut self, sections: SectionSet) -> Self {
        self.sections = sections;
        self
    }

    /// Sets how many blocks the cursor keeps for stepping back.
    #[must_use]
    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history.max(1);
        self
    }

    /// Checks `flag` between logical blocks.
    #[must_use]
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Names the input in traces and error context.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// The enabled sections.
    #[must_use]
    pub fn sections(&self) -> SectionSet {
        self.sections
    }

    /// The input name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parses one report from `source`, writing a single object to `sink`.
    ///
    /// # Errors
    /// Returns the first hard parse error, with the source name and line
    /// attached, or a cancellation, I/O or sink error.
    pub fn parse<S: LineSource>(
        &self,
        source: S,
        sink: &mut dyn ReportSink,
        tracer: &mut Tracer,
    ) -> Result<()> {
        tracer.report_start(&self.source);
        let mut cursor = BlockCursor::with_history(BlockReader::new(source), self.history);
        if let Some(flag) = &self.cancel {
            cursor = cursor.with_cancel(flag.clone());
        }
        let result = self.run(&mut cursor, sink, tracer);
        let lines = cursor.last_line();
        tracer.report_end(&self.source, lines, result.is_ok());
        result.map_err(|e| self.locate(e, lines))
    }

    /// Parses report text.
    ///
    /// # Errors
    /// See [`ReportParser::parse`].
    pub fn parse_str(&self, text: &str, sink: &mut dyn ReportSink, tracer: &mut Tracer) -> Result<()> {
        self.parse(StrLines::new(text), sink, tracer)
    }

    /// Parses a report from a buffered reader.
    ///
    /// # Errors
    /// See [`ReportParser::parse`].
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
        sink: &mut dyn ReportSink,
        tracer: &mut Tracer,
    ) -> Result<()> {
        self.parse(IoLines::new(reader), sink, tracer)
    }

    /// Parses report text into a typed [`Report`].
    ///
    /// # Errors
    /// See [`ReportParser::parse`].
    pub fn parse_report(&self, text: &str) -> Result<Report> {
        self.parse_report_with(text, &mut Tracer::disabled())
    }

    /// Parses report text into a typed [`Report`], recording to `tracer`.
    ///
    /// # Errors
    /// See [`ReportParser::parse`].
    pub fn parse_report_with(&self, text: &str, tracer: &mut Tracer) -> Result<Report> {
        let mut sink = ValueSink::new();
        self.parse_str(text, &mut sink, tracer)?;
        Report::from_value(sink.into_value()?)
    }

    fn run<I>(
        &self,
        cursor: &mut BlockCursor<I>,
        sink: &mut dyn ReportSink,
        tracer: &mut Tracer,
    ) -> Result<()>
    where
        I: Iterator<Item = Result<Block>>,
    {
        sink.begin_object()?;
        let mut classifier = Classifier::new(self.sections);
        let mut active: Option<(SectionKind, ActiveSection)> = None;
        let mut section_line = 0;

        while cursor.next()? {
            let next_is_divider = matches!(cursor.peek(1)?, Some(b) if b.is_divider());
            let Some(block) = cursor.current() else {
                break;
            };
            let start = detect_start(block, next_is_divider);
            let continues = active
                .as_ref()
                .is_some_and(|(_, section)| section.wants(block));

            match classifier.step(start, continues) {
                Transition::Begin(kind) => {
                    tracer.section_enter(kind.name(), block.line);
                    let section = ActiveSection::begin(kind, block, sink)
                        .map_err(|e| e.in_section(kind.name()))?;
                    active = Some((kind, section));
                    section_line = block.last_line();
                }
                Transition::Reenter => {
                    if let Some((kind, section)) = active.as_mut() {
                        section
                            .reenter(block, sink, tracer)
                            .map_err(|e| e.in_section(kind.name()))?;
                    }
                    section_line = block.last_line();
                }
                Transition::Continue => {
                    if let Some((kind, section)) = active.as_mut() {
                        section
                            .accept(block, sink)
                            .map_err(|e| e.in_section(kind.name()))?;
                    }
                    section_line = block.last_line();
                }
                Transition::Terminate => {
                    if let Some((kind, section)) = active.take() {
                        finish(kind, section, section_line, sink, tracer)?;
                    }
                    cursor.back()?;
                }
                Transition::Skip => {
                    if !block.is_blank() {
                        tracer.block_skipped(block.line, block.text());
                    }
                }
            }
        }

        if let Some((kind, section)) = active.take() {
            finish(kind, section, cursor.last_line(), sink, tracer)?;
        }
        sink.end_object()
    }

    fn locate(&self, error: Error, fallback_line: usize) -> Error {
        if error.context.is_some() {
            return error;
        }
        let line = error.line().unwrap_or(fallback_line);
        error.with_context(ErrorContext::new().with_source(&self.source).with_line(line))
    }
}

fn finish(
    kind: SectionKind,
    section: ActiveSection,
    line: usize,
    sink: &mut dyn ReportSink,
    tracer: &mut Tracer,
) -> Result<()> {
    section
        .finish(line, sink, tracer)
        .map_err(|e| e.in_section(kind.name()))?;
    tracer.section_leave(kind.name(), line);
    Ok(())
}
