use crate::parser::{RecordParser, Rule};
use anyhow::{anyhow, Result};
use pest::iterators::Pair;
use pest::Parser;

/// Share of an expense carried by one beneficiary account.
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    pub beneficiary: String,
    pub ratio: f64,
}

impl Split {
    pub fn new<S: Into<String>>(beneficiary: S, ratio: f64) -> Self {
        Self {
            beneficiary: beneficiary.into(),
            ratio,
        }
    }

    /// Portion of `amount` this split accounts for.
    pub fn share_of(&self, amount: f64) -> f64 {
        self.ratio * amount
    }
}

#[derive(Debug, PartialEq)]
pub struct ParsedModifier<'m> {
    pub(crate) account: &'m str,
    pub(crate) ratio: f64,
}

impl<'m> ParsedModifier<'m> {
    pub fn parse(token: Pair<'m, Rule>) -> Result<ParsedModifier<'m>> {
        if token.as_rule() != Rule::modifier {
            return Err(anyhow!(format!(
                "unexpected token for modifier: '{}'",
                token.as_str()
            )));
        }

        let mut pairs = token.into_inner();
        let account = pairs
            .next()
            .ok_or(anyhow!(format!("invalid account: '{}'", pairs.as_str())))?
            .as_str();
        let ratio = pairs
            .next()
            .ok_or(anyhow!(format!("invalid ratio for `{}'", account)))?
            .as_str();

        Ok(Self {
            account,
            ratio: ratio
                .parse::<f64>()
                .map_err(|e| anyhow!(format!("invalid ratio '{}': {}", ratio, e)))?,
        })
    }
}

/// Parse a modifier spec such as `Bob 0.3 Carol 0.2`.
pub fn parse_modifiers(spec: &str) -> Result<Vec<ParsedModifier<'_>>> {
    let modifiers = RecordParser::parse(Rule::modifiers, spec)?
        .next()
        .ok_or(anyhow!(format!("empty modifier spec: '{}'", spec)))?;

    modifiers
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::modifier)
        .map(ParsedModifier::parse)
        .collect()
}

/// Build the split list of an expense paid by `source`.
///
/// Modifiers naming `source` itself are ignored. Whatever the explicit ratios leave over
/// becomes the self share, always appended last. Ratios are not range checked, so explicit
/// ratios above 1.0 in total leave a negative self share.
pub fn apportion<'a, I>(source: &str, modifiers: I) -> Vec<Split>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut self_share = 1.0f64;
    let mut splits: Vec<Split> = modifiers
        .into_iter()
        .filter(|(account, _)| *account != source)
        .map(|(account, ratio)| {
            self_share -= ratio;
            Split::new(account, ratio)
        })
        .collect();

    splits.push(Split::new(source, self_share));
    splits
}

/// Sum of all ratios, 1.0 for any list produced by [`apportion`].
pub fn total_ratio(splits: &[Split]) -> f64 {
    splits.iter().map(|s| s.ratio).sum()
}
