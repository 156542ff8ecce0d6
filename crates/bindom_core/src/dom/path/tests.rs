use crate::dom::{BindomError, FieldPath, PathStep};

#[test]
fn parses_members_and_indices() {
	let path = FieldPath::parse("header.entries[2].size").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Field("header".to_owned()),
			PathStep::Field("entries".to_owned()),
			PathStep::Index(2),
			PathStep::Field("size".to_owned()),
		]
	);
}

#[test]
fn parses_chained_indices() {
	let path = FieldPath::parse("grid[1][0]").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Field("grid".to_owned()), PathStep::Index(1), PathStep::Index(0)]);
}

#[test]
fn display_matches_input() {
	for input in ["a", "a.b", "list[3]", "outer.inner[0][1].leaf_2"] {
		assert_eq!(FieldPath::parse(input).expect("path parses").to_string(), input);
	}
}

#[test]
fn rejects_malformed_paths() {
	for input in ["", ".a", "a.", "a..b", "a[", "a[]", "a[x]", "a[1", "[0]", "a-b", "a[1]b", "a[1]]", "a[-1]", "a[99999999999999999999999]"] {
		let err = FieldPath::parse(input).expect_err("malformed path");
		assert!(matches!(err, BindomError::InvalidFieldPath { ref path } if path == input), "{input}");
	}
}
