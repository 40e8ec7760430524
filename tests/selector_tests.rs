use fieldql::{Operator, Path, Selector, Term, parse_selector};

fn term(operator: Operator, segments: &[&str], values: &[&str]) -> Term {
    Term {
        operator,
        path: Path::new(segments.iter().map(|s| s.to_string()).collect()),
        values: values.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn selector_string_representation() {
    let cases = [
        (
            // Single term
            Selector {
                terms: vec![term(Operator::Eq, &["myattr"], &["myvalue"])],
            },
            "(eq,myattr,'myvalue')",
        ),
        (
            // Escape ~ in path segment
            Selector {
                terms: vec![term(Operator::Eq, &["my~attr"], &["myvalue"])],
            },
            "(eq,my~0attr,'myvalue')",
        ),
        (
            // Escape / in path segment
            Selector {
                terms: vec![term(Operator::Eq, &["my/attr"], &["myvalue"])],
            },
            "(eq,my~1attr,'myvalue')",
        ),
        (
            // Escape @ in path segment
            Selector {
                terms: vec![term(Operator::Eq, &["my@attr"], &["myvalue"])],
            },
            "(eq,my~battr,'myvalue')",
        ),
        (
            // Don't escape @ in @key
            Selector {
                terms: vec![term(Operator::Eq, &["mydict", "@key"], &["myvalue"])],
            },
            "(eq,mydict/@key,'myvalue')",
        ),
        (
            // Multiple terms
            Selector {
                terms: vec![
                    term(Operator::Eq, &["myattr"], &["myvalue"]),
                    term(Operator::Neq, &["yourattr"], &["yourvalue"]),
                ],
            },
            "(eq,myattr,'myvalue');(neq,yourattr,'yourvalue')",
        ),
        (
            // Multiple path segments
            Selector {
                terms: vec![term(Operator::Eq, &["myattr", "yourattr"], &["yourvalue"])],
            },
            "(eq,myattr/yourattr,'yourvalue')",
        ),
        (
            // Multiple values
            Selector {
                terms: vec![term(Operator::In, &["myattr"], &["myvalue", "yourvalue"])],
            },
            "(in,myattr,'myvalue','yourvalue')",
        ),
    ];
    for (selector, expected) in cases {
        assert_eq!(selector.to_string(), expected);
    }
}

#[test]
fn parsed_paths_serialize_back_to_their_input() {
    let inputs = [
        "myattr",
        "metadata/name,spec/nodeId",
        "my~0attr,my~1attr,my~aattr,my~battr",
        "mydict/@key",
    ];
    for input in inputs {
        let paths = parse_selector(input).unwrap();
        let rendered = paths
            .iter()
            .map(Path::to_string)
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(rendered, input, "serialization of '{input}'");
    }
}

#[test]
fn selector_paths_decode_escapes() {
    let paths = parse_selector("my~0~1~a~battr").unwrap();
    assert_eq!(paths[0].segments, ["my~/,@attr"]);
}

#[test]
fn selectors_survive_a_serde_round_trip() {
    let selector = Selector {
        terms: vec![term(Operator::Nin, &["spec", "nodeId"], &["a", "b"])],
    };
    let encoded = serde_json::to_string(&selector).unwrap();
    let decoded: Selector = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, selector);
}
