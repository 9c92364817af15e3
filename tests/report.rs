mod common;

use piggly::model::Procedure;
use piggly::profile::Profile;
use piggly::report;

const SENTINEL: &str = r#"<span style="display:none">-1</span>"#;

fn write_fixture(parallel: bool) -> (tempfile::TempDir, std::path::PathBuf, Vec<std::path::PathBuf>) {
    let dump = common::fixture();
    let (mut config, dir, out) = common::setup_output();
    config.parallel = parallel;

    let procedures: Vec<&Procedure> = dump.procedures().collect();
    let written = report::write_all(
        &procedures,
        &dump,
        |p| report::plain_listing(dump.source(p).unwrap_or_default(), dump.tags(p)),
        &config,
    )
    .unwrap();
    (dir, out, written)
}

#[test]
fn writes_one_page_per_procedure_and_index() {
    let (_dir, out, written) = write_fixture(false);

    assert_eq!(written.len(), 4);
    for name in [
        "public.transfer.html",
        "public.broken.html",
        "public.rows.html",
        "index.html",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert_eq!(written.last().unwrap(), &out.join("index.html"));
}

#[test]
fn parallel_output_matches_serial_file_set() {
    let (_dir, out, written) = write_fixture(true);
    assert_eq!(written.len(), 4);
    assert!(out.join("public.rows.html").is_file());
}

#[test]
fn transfer_page_contents() {
    let (_dir, out, _) = write_fixture(false);
    let html = std::fs::read_to_string(out.join("public.transfer.html")).unwrap();

    assert!(html.contains("<title>Code Coverage: transfer</title>"));
    // three arguments: multi-line signature
    assert!(html.contains("</b>\n\t( <span class=\"tK\">IN</span>\t<span class=\"tI\">src</span>"));
    assert!(html.contains("<span class=\"tK\">SECURITY DEFINER</span>"));
    // summary derived from tags: 2 blocks at 50%, 1 branch at 0%
    assert!(html.contains(r#"<td class="count">2</td><td class="count">0</td><td class="count">1</td>"#));
    assert!(html.contains("50.00%"));
    // escaped plain listing with six numbered lines
    assert!(html.contains("IF amount &lt;= 0 THEN"));
    assert!(html.contains(r##"<a href="#L6" id="L6">6</a></td>"##));
    assert!(!html.contains(r##"id="L7""##));
    // only incomplete tags are listed
    assert!(html.contains(r##"<li class="branch"><a href="#T2">IF amount &lt;= 0</a></li>"##));
    assert!(html.contains(r##"<li class="block"><a href="#T3">RAISE</a></li>"##));
    assert!(!html.contains("#T1"));
    assert!(html.contains(r#"<a href="index.html">Index</a>"#));
    assert!(html.contains("Generated by piggly 2.2.3 at "));
    assert!(html.contains(" UTC</div>"));
}

/// Ids referenced by `href="#T..."` links in a page.
fn tag_links(html: &str) -> Vec<String> {
    html.split(r##"href="#T"##)
        .skip(1)
        .map(|rest| format!("T{}", &rest[..rest.find('"').unwrap()]))
        .collect()
}

#[test]
fn every_tag_link_has_a_target() {
    let (_dir, _out, written) = write_fixture(false);
    let mut checked = 0;

    for path in &written {
        let html = std::fs::read_to_string(path).unwrap();
        for id in tag_links(&html) {
            assert!(
                html.contains(&format!(r#"id="{id}""#)),
                "{} links to #{id} with no target",
                path.display()
            );
            checked += 1;
        }
    }
    // transfer has two incomplete tags, rows has one
    assert_eq!(checked, 3);
}

#[test]
fn tag_targets_sit_on_their_lines() {
    let (_dir, out, _) = write_fixture(false);
    let html = std::fs::read_to_string(out.join("public.transfer.html")).unwrap();
    assert!(html.contains("<span id=\"T2\"></span>  IF amount &lt;= 0 THEN"));
    assert!(html.contains("<span id=\"T3\"></span>    RAISE EXCEPTION"));
}

#[test]
fn index_overall_matches_rows() {
    let (_dir, out, _) = write_fixture(false);
    let html = std::fs::read_to_string(out.join("index.html")).unwrap();
    let overall = &html[..html.find("<tr><th>Procedure</th>").unwrap()];

    // transfer: 2 blocks at 50%, 1 branch at 0%; rows: 2 blocks at 100%,
    // 1 loop at 37%, 0 branches; broken contributes nothing
    assert!(overall.contains(
        r#"<tr class="even"><td class="count">4</td><td class="count">1</td><td class="count">1</td>"#
    ));
    assert!(overall.contains("75.00%"));
    assert!(overall.contains("37.00%"));
    assert!(overall.contains("0.00%"));
}

#[test]
fn duplicate_output_paths_write_nothing() {
    let mut a = Procedure::new("public.f", "f", "void");
    a.source_path = Some("/cache/public/f.plpgsql".to_string());
    let mut b = Procedure::new("audit.f", "f", "void");
    b.source_path = Some("/cache/audit/f.plpgsql".to_string());
    let dump = common::fixture();
    let (mut config, _dir, out) = common::setup_output();
    config.parallel = true;

    let err = report::write_all(&[&a, &b], &dump, |_| Vec::new(), &config).unwrap_err();
    assert!(matches!(err, piggly::error::PigglyError::DuplicateOutput { .. }));
    assert!(!out.exists());
}

#[test]
fn broken_page_uses_sentinels() {
    let (_dir, out, _) = write_fixture(false);
    let html = std::fs::read_to_string(out.join("public.broken.html")).unwrap();
    assert_eq!(html.matches(SENTINEL).count(), 6);
    assert!(html.contains(r#"<div class="toc"><a href="index.html">Index</a></div>"#));
}

#[test]
fn rows_page_uses_supplied_summary() {
    let (_dir, out, _) = write_fixture(false);
    let html = std::fs::read_to_string(out.join("public.rows.html")).unwrap();

    assert!(html.contains("<span class=\"tK\">STRICT</span>\n<span class=\"tK\">RETURNS SETOF</span>"));
    assert!(html.contains(r#"<td class="covered" width="18"></td>"#));
    assert!(html.contains(r#"<td class="uncovered" width="31"></td>"#));
    assert!(html.contains(r#"<td class="covered" width="50"></td>"#));
    assert!(html.contains(r#"<td class="uncovered" width="0"></td>"#));
    // branch key present with no percent: one hidden marker, real counts
    assert_eq!(html.matches(SENTINEL).count(), 1);
}

#[test]
fn index_rows_and_links() {
    let (_dir, out, _) = write_fixture(false);
    let html = std::fs::read_to_string(out.join("index.html")).unwrap();

    assert!(html.contains(
        r#"<tr class="even"><td class="file"><a href="public.transfer.html">public.transfer.plpgsql</a></td>"#
    ));
    assert!(html.contains(r#"<tr class="odd"><td class="file fail">public.broken.plpgsql</td>"#));
    assert!(html.contains(
        r#"<tr class="even"><td class="file"><a href="public.rows.html">public.rows.plpgsql</a></td>"#
    ));
    // every link in the table points at a page that was written
    for page in ["public.transfer.html", "public.rows.html"] {
        assert!(out.join(page).is_file());
    }
}
