//! Canonical one-line records for tracks and papers.
//!
//! - Track header: `name,pageLimit,extraPagesPayRate`
//! - Paper: `id,state,authorNames,paperType,processed,reviewer,note`
//!
//! `reviewer` and `note` may be empty. A paper line without the trailing
//! note column is accepted and reads as an empty note.

use crate::error::{ReviewError, ReviewResult};
use crate::model::paper::{PaperRecord, PaperState, PaperType};
use crate::repo::track::TrackHeader;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static TRACK_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^,]+?)\s*,\s*(\d+)\s*,\s*(\d+)\s*$").expect("valid track header regex")
});
static PAPER_RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*,([^,]*),([^,]*),([^,]*),\s*((?i:true|false))\s*,([^,]*)(?:,([^,]*))?$")
        .expect("valid paper record regex")
});

impl Display for TrackHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.name, self.page_limit, self.extra_pages_pay_rate
        )
    }
}

impl FromStr for TrackHeader {
    type Err = ReviewError;

    fn from_str(line: &str) -> ReviewResult<Self> {
        let captures = TRACK_HEADER_RE
            .captures(line)
            .ok_or_else(|| ReviewError::invalid_argument(format!("malformed track header `{line}`")))?;

        Ok(Self {
            name: captures[1].to_string(),
            page_limit: parse_number(&captures[2], "page limit")?,
            extra_pages_pay_rate: parse_number(&captures[3], "extra pages pay rate")?,
        })
    }
}

impl Display for PaperRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.id,
            self.state.as_str(),
            self.author_names,
            self.paper_type.as_str(),
            self.processed,
            self.reviewer,
            self.note
        )
    }
}

impl FromStr for PaperRecord {
    type Err = ReviewError;

    fn from_str(line: &str) -> ReviewResult<Self> {
        let captures = PAPER_RECORD_RE
            .captures(line)
            .ok_or_else(|| ReviewError::invalid_argument(format!("malformed paper record `{line}`")))?;

        let state_token = captures[2].trim();
        let state = PaperState::parse(state_token).ok_or_else(|| {
            ReviewError::invalid_argument(format!("unknown paper state `{state_token}`"))
        })?;
        let type_token = captures[4].trim();
        let paper_type = PaperType::parse(type_token).ok_or_else(|| {
            ReviewError::invalid_argument(format!("unknown paper type `{type_token}`"))
        })?;

        Ok(Self {
            id: parse_number(&captures[1], "paper id")?,
            state,
            author_names: captures[3].trim().to_string(),
            paper_type,
            processed: captures[5].eq_ignore_ascii_case("true"),
            reviewer: captures[6].trim().to_string(),
            note: captures
                .get(7)
                .map(|note| note.as_str().trim().to_string())
                .unwrap_or_default(),
        })
    }
}

fn parse_number(value: &str, field: &str) -> ReviewResult<u32> {
    value
        .parse()
        .map_err(|_| ReviewError::invalid_argument(format!("{field} `{value}` is not a valid number")))
}

#[cfg(test)]
mod tests {
    use crate::model::paper::{PaperRecord, PaperState, PaperType};
    use crate::repo::track::TrackHeader;

    #[test]
    fn parses_track_header() {
        let header: TrackHeader = "Research Track,10,11".parse().expect("header");
        assert_eq!(header.name, "Research Track");
        assert_eq!(header.page_limit, 10);
        assert_eq!(header.extra_pages_pay_rate, 11);
        assert_eq!(header.to_string(), "Research Track,10,11");
    }

    #[test]
    fn rejects_header_with_wrong_column_count() {
        assert!("Research Track,10".parse::<TrackHeader>().is_err());
        assert!("Research,Track,10,11".parse::<TrackHeader>().is_err());
        assert!("Research Track,-1,11".parse::<TrackHeader>().is_err());
    }

    #[test]
    fn parses_paper_record_with_empty_trailing_columns() {
        let record: PaperRecord = "3,Submitted,Alice,Abstract,false,,".parse().expect("record");
        assert_eq!(record.id, 3);
        assert_eq!(record.state, PaperState::Submitted);
        assert_eq!(record.paper_type, PaperType::Abstract);
        assert!(!record.processed);
        assert_eq!(record.reviewer, "");
        assert_eq!(record.note, "");
    }

    #[test]
    fn parses_paper_record_without_note_column() {
        let record: PaperRecord = "5,Reviewing,anonymous,FullPaper,false,rev1"
            .parse()
            .expect("record without note");
        assert_eq!(record.reviewer, "rev1");
        assert_eq!(record.note, "");
    }

    #[test]
    fn rejects_unknown_tokens_and_extra_columns() {
        assert!("1,Lost,Alice,Abstract,false,,".parse::<PaperRecord>().is_err());
        assert!("1,Submitted,Alice,Poster,false,,".parse::<PaperRecord>().is_err());
        assert!("1,Submitted,Alice,Abstract,maybe,,".parse::<PaperRecord>().is_err());
        assert!("1,Submitted,Alice,Abstract,false,,,extra".parse::<PaperRecord>().is_err());
        assert!("x,Submitted,Alice,Abstract,false,,".parse::<PaperRecord>().is_err());
    }

    #[test]
    fn formats_paper_record_in_column_order() {
        let record = PaperRecord {
            id: 12,
            state: PaperState::Closed,
            author_names: "Alice".to_string(),
            paper_type: PaperType::FullPaper,
            processed: true,
            reviewer: String::new(),
            note: "Accepted".to_string(),
        };
        assert_eq!(record.to_string(), "12,Closed,Alice,FullPaper,true,,Accepted");
    }
}
