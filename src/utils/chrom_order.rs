use regex::Regex;

/// Sort chromosome labels "chr1", "chr2", ..., "chrX" in a natural order:
/// numeric suffixes first in numeric order, then X/Y/M(T), then the rest
/// lexicographically.
pub fn natural_chrom_sort(labels: &[String]) -> Vec<String> {
    let trailing_digits = Regex::new(r"(\d+)$").unwrap();

    let mut sorted = labels.to_vec();
    sorted.sort_by_key(|s| sort_key(s, &trailing_digits));
    sorted
}

fn sort_key(s: &str, trailing_digits: &Regex) -> (u8, u64, String) {
    if let Some(caps) = trailing_digits.captures(s) {
        if let Ok(n) = caps[1].parse::<u64>() {
            return (0, n, String::new());
        }
    }
    let tag = s.replace("chr", "").to_uppercase();
    let special = match tag.as_str() {
        "X" => 1,
        "Y" => 2,
        "M" | "MT" => 3,
        _ => 999,
    };
    (1, special, tag)
}

/// Keep only the part after the final '.' in each label
/// ("glyma.Wm82.Gm15" -> "Gm15").
pub fn shorten_after_last_dot(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|s| match s.rsplit_once('.') {
            Some((_, tail)) => tail.to_string(),
            None => s.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_numeric_order() {
        let sorted = natural_chrom_sort(&labels(&["chr10", "chr2", "chr1"]));
        assert_eq!(sorted, labels(&["chr1", "chr2", "chr10"]));
    }

    #[test]
    fn test_sex_chromosomes_after_numeric() {
        let sorted = natural_chrom_sort(&labels(&["chrX", "chr3", "chrY", "chr12"]));
        assert_eq!(sorted, labels(&["chr3", "chr12", "chrX", "chrY"]));
    }

    #[test]
    fn test_shorten_after_last_dot() {
        let shortened = shorten_after_last_dot(&labels(&["glyma.Wm82.Gm15", "Gm01"]));
        assert_eq!(shortened, labels(&["Gm15", "Gm01"]));
    }
}
