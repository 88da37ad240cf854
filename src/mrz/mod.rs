// Machine-Readable Zone parsing and date helpers
//
// Extraction works on the two-line MRZ of the document data page (TD3
// layout). Offsets into the second line are fixed by the ICAO format:
// document number [0,9), date of birth [13,19), date of expiry [21,27).
// Check digits are not validated here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MrzError {
    #[error("invalid MRZ format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, MrzError>;

/// Identity fields extracted from raw MRZ text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzInfo {
    pub document_number: String,
    pub birth_date: String,
    pub expiry_date: String,
}

/// Number of bytes of line 2 the fixed-offset fields reach into.
const MIN_LINE2_LEN: usize = 27;

/// Parse a raw two-line MRZ block into its identity fields.
///
/// Fails closed: fewer than two lines, non-ASCII content or a second line
/// shorter than the last fixed offset are all `InvalidFormat`. The filler
/// character `<` is stripped from the document number and all three fields
/// are whitespace-trimmed.
pub fn parse_mrz(text: &str) -> Result<MrzInfo> {
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() < 2 {
        return Err(MrzError::InvalidFormat(
            "expected two lines of MRZ data".to_string(),
        ));
    }

    let line2 = lines[1];
    if !line2.is_ascii() {
        return Err(MrzError::InvalidFormat(
            "MRZ line contains non-ASCII characters".to_string(),
        ));
    }
    if line2.len() < MIN_LINE2_LEN {
        return Err(MrzError::InvalidFormat(format!(
            "second MRZ line too short: {} < {} bytes",
            line2.len(),
            MIN_LINE2_LEN
        )));
    }

    let document_number = line2[0..9].replace('<', "").trim().to_string();
    let birth_date = line2[13..19].trim().to_string();
    let expiry_date = line2[21..27].trim().to_string();

    Ok(MrzInfo {
        document_number,
        birth_date,
        expiry_date,
    })
}

/// Convert a chip-sourced date like "1974-08-12 00:00:00 +0000" to the
/// YYMMDD form the MRZ fields use.
pub fn date_to_yymmdd(input: &str) -> Result<String> {
    if input.len() < 10 || !input.as_bytes()[..10].is_ascii() {
        return Err(MrzError::InvalidFormat(format!(
            "expected a date starting with YYYY-MM-DD, got {:?}",
            input
        )));
    }
    let year = &input[2..4];
    let month = &input[5..7];
    let day = &input[8..10];
    Ok(format!("{}{}{}", year, month, day))
}

/// Expand a YYMMDD birth date to ISO 8601, resolving the century with a
/// 100-year window against `current_year`.
pub fn expand_birth_date(yymmdd: &str, current_year: u16) -> Result<String> {
    let (yy, month, day) = split_yymmdd(yymmdd)?;
    let mut year = 1900 + yy;
    if current_year.saturating_sub(year) > 100 {
        year = 2000 + yy;
    }
    Ok(format!("{:04}-{}-{}", year, month, day))
}

/// Expand a YYMMDD expiry date to ISO 8601. Expiry dates are assumed to
/// fall in the 2000s.
pub fn expand_expiry_date(yymmdd: &str) -> Result<String> {
    let (yy, month, day) = split_yymmdd(yymmdd)?;
    Ok(format!("{:04}-{}-{}", 2000 + yy, month, day))
}

fn split_yymmdd(yymmdd: &str) -> Result<(u16, &str, &str)> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MrzError::InvalidFormat(format!(
            "expected a 6-digit YYMMDD date, got {:?}",
            yymmdd
        )));
    }
    let yy: u16 = yymmdd[0..2]
        .parse()
        .map_err(|_| MrzError::InvalidFormat("unparseable year".to_string()))?;
    Ok((yy, &yymmdd[2..4], &yymmdd[4..6]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MRZ: &str = "P<UTOERIKSSON<<ANNA<<<<<<<<<<<<<<<<<<<<<<<\nL898902C36UTO7408122F1204159<<<<<<<<<<<<<02";

    #[test]
    fn test_parse_sample_mrz() {
        let info = parse_mrz(SAMPLE_MRZ).unwrap();
        assert_eq!(info.document_number, "L898902C3");
        assert_eq!(info.birth_date, "740812");
        assert_eq!(info.expiry_date, "120415");
    }

    #[test]
    fn test_single_line_rejected() {
        let err = parse_mrz("P<UTOERIKSSON<<ANNA").unwrap_err();
        assert!(matches!(err, MrzError::InvalidFormat(_)));
    }

    #[test]
    fn test_short_second_line_rejected() {
        let err = parse_mrz("LINE1\nL898902C3").unwrap_err();
        assert!(matches!(err, MrzError::InvalidFormat(_)));
    }

    #[test]
    fn test_non_ascii_rejected() {
        let err = parse_mrz("LINE1\nL898902C36UTO7408122F1204159<<<<<<<<<é<02").unwrap_err();
        assert!(matches!(err, MrzError::InvalidFormat(_)));
    }

    #[test]
    fn test_date_to_yymmdd() {
        assert_eq!(date_to_yymmdd("1974-08-12 00:00:00 +0000").unwrap(), "740812");
        assert_eq!(date_to_yymmdd("2012-04-15").unwrap(), "120415");
        assert!(date_to_yymmdd("74-08").is_err());
    }

    #[test]
    fn test_expand_birth_date_century_window() {
        // 2024 - 1974 = 50 years: stays in the 1900s
        assert_eq!(expand_birth_date("740812", 2024).unwrap(), "1974-08-12");
        // 2024 - 1912 > 100 years: flips to the 2000s
        assert_eq!(expand_birth_date("120415", 2024).unwrap(), "2012-04-15");
    }

    #[test]
    fn test_expand_expiry_date() {
        assert_eq!(expand_expiry_date("120415").unwrap(), "2012-04-15");
        assert!(expand_expiry_date("12Q415").is_err());
    }
}
