use anyhow::{bail, Result};

/// Parse a period selector given as `N` or `L-U` (e.g. `165` or `155-156`).
/// Returns an inclusive `(lower, upper)` pair, reordered if given backwards.
pub fn parse_range_spec(spec: &str) -> Result<(u64, u64)> {
    let s: String = spec.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some((l, u)) = s.split_once('-') {
        let (l, u) = (parse_bound(l, spec)?, parse_bound(u, spec)?);
        if l > u {
            return Ok((u, l));
        }
        return Ok((l, u));
    }

    let n = parse_bound(&s, spec)?;
    Ok((n, n))
}

fn parse_bound(s: &str, full: &str) -> Result<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        bail!("range must be N or L-U (e.g. 165 or 155-156), got: {:?}", full);
    }
    Ok(s.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(parse_range_spec("165").unwrap(), (165, 165));
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_range_spec("155-156").unwrap(), (155, 156));
        assert_eq!(parse_range_spec(" 90 - 92 ").unwrap(), (90, 92));
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(parse_range_spec("92-90").unwrap(), (90, 92));
    }

    #[test]
    fn test_invalid() {
        assert!(parse_range_spec("abc").is_err());
        assert!(parse_range_spec("90-").is_err());
        assert!(parse_range_spec("").is_err());
    }
}
