//! The process-wide debugger, shared by every test in this binary, so all
//! checks run from a single test.

mod common;

use common::*;
use scoop::{ic, ic_format, IC};

use scoop::ic as peek;

#[test]
fn global_entry_points() {
    let out = capture(&IC);
    let x = 2;
    let word = String::from("hi");

    assert_eq!(ic!(x * 3), 6);
    assert_eq!(ic!(x, &word), (2, &word));
    ic!();
    assert_eq!(scoop::ic((x, 1)), (2, 1));
    assert_eq!(IC.ic((x + 1,)), 3);

    let text = ic_format!(word, x);
    assert_eq!(text, r#"ic| word: "hi", x: 2"#);
    assert_eq!(word, "hi");

    assert_eq!(peek!(x), 2);
    peek((x,));
    let local = &IC;
    local.ic((x,));
    let show = scoop::ic;
    show((x - 1,));

    IC.disable();
    assert_eq!(ic!(x), 2);
    IC.enable();

    let lines = out.lines();
    assert_eq!(lines[0], "ic| x * 3: 6");
    assert_eq!(lines[1], r#"ic| x: 2, &word: "hi""#);
    assert!(lines[2].starts_with("ic| global_entry_points.rs:"), "{}", lines[2]);
    assert!(lines[2].ends_with(" in global_entry_points()"), "{}", lines[2]);
    assert_eq!(
        &lines[3..],
        [
            "ic| x: 2, 1",
            "ic| x + 1: 3",
            "ic| x: 2",
            "ic| x: 2",
            "ic| x: 2",
            "ic| x - 1: 1",
        ]
    );
}
