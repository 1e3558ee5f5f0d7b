//! End-to-end scenarios over `sync_source`: full-text before/after pairs.

use commentsync_core::{sync_source, DocEntry, DocIndex, SyncOptions};

fn index(entries: &[(&str, &str)]) -> DocIndex {
    DocIndex {
        entries: entries
            .iter()
            .map(|(name, doc)| DocEntry {
                name: name.to_string(),
                doc: doc.to_string(),
            })
            .collect(),
    }
}

fn sync(source: &str, index: &DocIndex, overwrite: bool) -> String {
    sync_source(source, index, &SyncOptions { overwrite })
        .unwrap()
        .text
}

#[test]
fn inserts_a_block_above_an_undocumented_function() {
    let source = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
    let out = sync(source, &index(&[("add", "Adds two numbers.")]), false);
    assert_eq!(
        out,
        "/// <summary>\n\
         /// Adds two numbers.\n\
         /// </summary>\n\
         /// <param name=\"a\"><see cref=\"i32\"/> parameter</param>\n\
         /// <param name=\"b\"><see cref=\"i32\"/> parameter</param>\n\
         /// <returns><see cref=\"i32\"/> value</returns>\n\
         fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n"
    );
}

#[test]
fn replaces_an_existing_comment_when_indexed() {
    let source = "/// Stale words.\nfn go() {}\n";
    let out = sync(source, &index(&[("go", "Fresh words.")]), false);
    assert_eq!(
        out,
        "/// <summary>\n/// Fresh words.\n/// </summary>\nfn go() {}\n"
    );
}

#[test]
fn preserves_an_unindexed_existing_comment() {
    let source = "/// Hand-written and precious.\nfn keep() {}\n";
    let out = sync(source, &index(&[("other", "Unrelated.")]), false);
    assert_eq!(out, source);
}

#[test]
fn overwrite_regenerates_even_unindexed_comments() {
    let source = "/// Hand-written.\nfn lose() {}\n";
    let out = sync(source, &index(&[]), true);
    assert_eq!(out, "/// <summary>\n///\n/// </summary>\nfn lose() {}\n");
}

#[test]
fn overwrite_with_no_entry_still_documents_the_shape() {
    let source = "/// Old words.\nfn log(msg: &str) {}\n";
    let out = sync(source, &index(&[]), true);
    assert_eq!(
        out,
        "/// <summary>\n\
         ///\n\
         /// </summary>\n\
         /// <param name=\"msg\"><see cref=\"&str\"/> parameter</param>\n\
         fn log(msg: &str) {}\n"
    );
}

#[test]
fn indented_impl_method_gets_an_indented_block() {
    let source = "impl Counter {\n    fn get(&self) -> u64 {\n        self.count\n    }\n}\n";
    let out = sync(source, &index(&[("get", "Returns the count.")]), false);
    assert_eq!(
        out,
        "impl Counter {\n\
         \x20   /// <summary>\n\
         \x20   /// Returns the count.\n\
         \x20   /// </summary>\n\
         \x20   /// <returns><see cref=\"u64\"/> value</returns>\n\
         \x20   fn get(&self) -> u64 {\n        self.count\n    }\n}\n"
    );
}

#[test]
fn callable_type_alias_is_documented() {
    let source = "pub type Filter = fn(line: &str) -> bool;\n";
    let out = sync(source, &index(&[("Filter", "Line predicate.")]), false);
    assert_eq!(
        out,
        "/// <summary>\n\
         /// Line predicate.\n\
         /// </summary>\n\
         /// <param name=\"line\"><see cref=\"&str\"/> parameter</param>\n\
         /// <returns><see cref=\"bool\"/> value</returns>\n\
         pub type Filter = fn(line: &str) -> bool;\n"
    );
}

#[test]
fn code_comments_and_blank_lines_survive_untouched() {
    let source = "// file header note\n\nfn f() {\n    // inner note\n    let x = 1; // trailing\n}\n";
    let out = sync(source, &index(&[("f", "Doc.")]), false);
    assert_eq!(
        out,
        "// file header note\n\n\
         /// <summary>\n/// Doc.\n/// </summary>\n\
         fn f() {\n    // inner note\n    let x = 1; // trailing\n}\n"
    );
}

#[test]
fn regenerating_a_mid_file_comment_leaves_earlier_code_alone() {
    let source = "fn first() {}\n\n/// Stale.\nfn second() {}\n";
    let out = sync(source, &index(&[("second", "Fresh.")]), false);
    assert_eq!(
        out,
        "fn first() {}\n\n/// <summary>\n/// Fresh.\n/// </summary>\nfn second() {}\n"
    );
}

#[test]
fn attribute_between_doc_lines_survives_regeneration() {
    let source = "/// Old summary.\n#[inline]\n/// Old detail.\nfn hot() {}\n";
    let out = sync(source, &index(&[("hot", "New words.")]), false);
    assert_eq!(
        out,
        "/// <summary>\n/// New words.\n/// </summary>\n#[inline]\nfn hot() {}\n"
    );
    // A second pass sees one doc run above the attribute and rewrites it
    // in place.
    assert_eq!(sync(&out, &index(&[("hot", "New words.")]), false), out);
}

#[test]
fn resync_with_the_same_index_is_a_no_op() {
    let source = "/// Old.\nfn a(x: u8) -> u8 { x }\n\nfn b() {}\n";
    let idx = index(&[("a", "Alpha."), ("b", "Beta.")]);
    let once = sync(source, &idx, false);
    let twice = sync(&once, &idx, false);
    assert_eq!(once, twice);
}

#[test]
fn overwrite_resync_is_also_a_no_op() {
    let source = "fn a(x: u8) -> u8 { x }\n/// Kept? No.\nfn b() {}\n";
    let idx = index(&[("a", "Alpha.")]);
    let once = sync(source, &idx, true);
    let twice = sync(&once, &idx, true);
    assert_eq!(once, twice);
}

#[test]
fn multibyte_text_earlier_in_the_file_does_not_shift_edits() {
    let source = "// naïve café ☕\nfn brew() {}\n";
    let out = sync(source, &index(&[("brew", "Brews.")]), false);
    assert_eq!(
        out,
        "// naïve café ☕\n/// <summary>\n/// Brews.\n/// </summary>\nfn brew() {}\n"
    );
}

#[test]
fn crlf_files_get_crlf_blocks() {
    let source = "fn f() {}\r\n";
    let out = sync(source, &index(&[("f", "Doc.")]), false);
    assert_eq!(
        out,
        "/// <summary>\r\n/// Doc.\r\n/// </summary>\r\nfn f() {}\r\n"
    );
}

#[test]
fn multiline_index_prose_spans_comment_lines() {
    let source = "fn f() {}\n";
    let out = sync(source, &index(&[("f", "First line.\n\nSecond line.")]), false);
    assert_eq!(
        out,
        "/// <summary>\n/// First line.\n///\n/// Second line.\n/// </summary>\nfn f() {}\n"
    );
}

#[test]
fn counters_track_the_run() {
    let source = "/// Kept.\nfn keep() {}\nfn fill() {}\n";
    let outcome = sync_source(
        source,
        &index(&[("fill", "Filled.")]),
        &SyncOptions { overwrite: false },
    )
    .unwrap();
    assert_eq!(outcome.summary.declarations, 2);
    assert_eq!(outcome.summary.regenerated, 1);
    assert_eq!(outcome.summary.preserved, 1);
}

#[test]
fn full_module_snapshot() {
    let source = "pub struct Tally;\n\nimpl Tally {\n    pub fn add(&mut self, amount: u32) -> u32 {\n        amount\n    }\n}\n";
    let out = sync(source, &index(&[("add", "Accumulates an amount.")]), false);
    insta::assert_snapshot!(out, @r###"
    pub struct Tally;

    impl Tally {
        /// <summary>
        /// Accumulates an amount.
        /// </summary>
        /// <param name="amount"><see cref="u32"/> parameter</param>
        /// <returns><see cref="u32"/> value</returns>
        pub fn add(&mut self, amount: u32) -> u32 {
            amount
        }
    }
    "###);
}

#[test]
fn empty_source_is_passed_through() {
    let outcome = sync_source("", &index(&[]), &SyncOptions::default()).unwrap();
    assert_eq!(outcome.text, "");
    assert_eq!(outcome.summary.declarations, 0);
}

#[test]
fn unparsable_source_is_an_error_not_a_write() {
    let err = sync_source("fn broken( {", &index(&[]), &SyncOptions::default()).unwrap_err();
    let msg = err.to_string();
    assert!(!msg.is_empty());
}
