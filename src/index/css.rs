/// Rule extraction on top of `cssparser`.
///
/// Walks every style rule of a stylesheet, descending into grouping
/// at-rules such as `@media`, and records each rule's selector list
/// together with its source span.  Declarations are skipped without being
/// interpreted.
use cssparser::{
    AtRuleParser, CowRcStr, ParseError, Parser, ParserInput, ParserState, QualifiedRuleParser,
    SourceLocation, StyleSheetParser,
};
use tower_lsp::lsp_types::{Position, Range};

/// At-rules whose block is itself a list of rules.
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "layer",
    "container",
    "document",
    "-moz-document",
    "scope",
    "starting-style",
];

/// A style rule: its selectors and where it sits in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleSpan {
    pub selectors: Vec<String>,
    pub range: Range,
}

#[derive(Debug, Default)]
pub(crate) struct RuleScan {
    pub rules: Vec<RuleSpan>,
    /// Rules the parser rejected and skipped over.
    pub skipped: usize,
}

/// Parse `css` and collect all style rules in document order.
pub(crate) fn scan_rules(css: &str) -> RuleScan {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collector = RuleCollector::default();
    collect_rule_list(&mut parser, &mut collector);
    collector.scan
}

fn collect_rule_list<'i>(input: &mut Parser<'i, '_>, collector: &mut RuleCollector) {
    let mut skipped = 0;
    for result in StyleSheetParser::new(input, collector) {
        if let Err((error, slice)) = result {
            tracing::debug!(
                "Skipping unparsable rule at {}:{}: {:?}",
                error.location.line + 1,
                error.location.column,
                slice.trim()
            );
            skipped += 1;
        }
    }
    collector.scan.skipped += skipped;
}

#[derive(Default)]
struct RuleCollector {
    scan: RuleScan,
}

impl<'i> QualifiedRuleParser<'i> for RuleCollector {
    type Prelude = Vec<String>;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        input.parse_comma_separated(|input| {
            let start = input.position();
            while input.next().is_ok() {}
            Ok(normalize_selector(input.slice_from(start)))
        })
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        // The block parser stops in front of the closing brace.
        let end = input.current_source_location();
        self.scan.rules.push(RuleSpan {
            selectors,
            range: Range {
                start: start_position(start.source_location()),
                end: end_position(end),
            },
        });
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for RuleCollector {
    /// Whether the block holds nested rules.
    type Prelude = bool;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(GROUPING_AT_RULES
            .iter()
            .any(|rule| name.eq_ignore_ascii_case(rule)))
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        grouping: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        if grouping {
            collect_rule_list(input, self);
        } else {
            while input.next().is_ok() {}
        }
        Ok(())
    }
}

/// Trim a raw selector and collapse inner whitespace runs to one space.
fn normalize_selector(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `cssparser` lines are 0-based and columns 1-based; LSP wants both 0-based.
fn start_position(location: SourceLocation) -> Position {
    Position {
        line: location.line,
        character: location.column.saturating_sub(1),
    }
}

/// The 1-based column of the closing brace doubles as the 0-based column
/// just past it.
fn end_position(location: SourceLocation) -> Position {
    Position {
        line: location.line,
        character: location.column,
    }
}
