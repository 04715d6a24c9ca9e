//! Built-in citation reference data.

use casebook_types::citation::Citation;

fn cite(
    id: &str,
    title: &str,
    citation: &str,
    year: i32,
    court: &str,
    url: Option<&str>,
    summary: &str,
) -> Citation {
    Citation {
        id: id.to_string(),
        title: title.to_string(),
        citation: citation.to_string(),
        year,
        court: court.to_string(),
        url: url.map(str::to_string),
        summary: Some(summary.to_string()),
    }
}

/// Landmark cases shipped as the default catalog, in chronological order.
/// The first three entries double as the fallback result sample.
pub(super) fn builtin_citations() -> Vec<Citation> {
    vec![
        cite(
            "marbury-1803",
            "Marbury v. Madison",
            "5 U.S. 137",
            1803,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/5/137/"),
            "Established judicial review: federal courts may strike down statutes that conflict with the Constitution.",
        ),
        cite(
            "hadley-1854",
            "Hadley v. Baxendale",
            "9 Ex. 341",
            1854,
            "Court of Exchequer",
            None,
            "Contract damages are limited to losses arising naturally from the breach or within the contemplation of both parties.",
        ),
        cite(
            "palsgraf-1928",
            "Palsgraf v. Long Island Railroad Co.",
            "248 N.Y. 339",
            1928,
            "New York Court of Appeals",
            None,
            "Negligence liability requires a duty owed to a foreseeable plaintiff; proximate cause bounds the scope of duty.",
        ),
        cite(
            "donoghue-1932",
            "Donoghue v. Stevenson",
            "[1932] AC 562",
            1932,
            "House of Lords",
            None,
            "Founded the modern law of negligence through the neighbour principle, imposing a duty of care on manufacturers.",
        ),
        cite(
            "erie-1938",
            "Erie Railroad Co. v. Tompkins",
            "304 U.S. 64",
            1938,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/304/64/"),
            "Federal courts sitting in diversity must apply state substantive law; there is no general federal common law.",
        ),
        cite(
            "intlshoe-1945",
            "International Shoe Co. v. Washington",
            "326 U.S. 310",
            1945,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/326/310/"),
            "Personal jurisdiction over a nonresident requires minimum contacts consistent with fair play and substantial justice.",
        ),
        cite(
            "brown-1954",
            "Brown v. Board of Education",
            "347 U.S. 483",
            1954,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/347/483/"),
            "Racial segregation in public schools violates the Equal Protection Clause; separate educational facilities are inherently unequal.",
        ),
        cite(
            "miranda-1966",
            "Miranda v. Arizona",
            "384 U.S. 436",
            1966,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/384/436/"),
            "Statements from custodial interrogation are admissible only after warnings of the rights to silence and counsel.",
        ),
        cite(
            "chevron-1984",
            "Chevron U.S.A., Inc. v. Natural Resources Defense Council",
            "467 U.S. 837",
            1984,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/467/837/"),
            "Courts defer to an agency's reasonable interpretation of an ambiguous statute the agency administers.",
        ),
        cite(
            "daubert-1993",
            "Daubert v. Merrell Dow Pharmaceuticals, Inc.",
            "509 U.S. 579",
            1993,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/509/579/"),
            "Trial judges gatekeep expert testimony, admitting scientific evidence only when its reasoning and methods are reliable.",
        ),
        cite(
            "matal-2017",
            "Matal v. Tam",
            "582 U.S. 218",
            2017,
            "Supreme Court of the United States",
            Some("https://supreme.justia.com/cases/federal/us/582/218/"),
            "The Lanham Act's disparagement clause violates the First Amendment; trademarks are private speech the government may not censor.",
        ),
    ]
}
