use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0h8v8H0z"/></svg>"#;
const DETAILS_JSON: &str =
    r#"[{"area":"East","clinics":[{"name":"Clinic A","hours":"9-5","closed":"Sun"}]}]"#;

const HOST_PAGE: &str = r#"<!doctype html><html><head><title>Clinics</title></head><body>
<div id="clinic-map">
  <div data-clinic-title></div>
  <div data-clinic-map></div>
  <div data-clinic-details></div>
</div>
</body></html>"#;

fn write_resources(base: &Path) {
    fs::create_dir_all(base.join("img")).expect("img dir");
    fs::create_dir_all(base.join("json")).expect("json dir");
    fs::write(base.join("img").join("title.svg"), SVG).expect("title svg");
    fs::write(base.join("img").join("map_b.svg"), SVG).expect("map svg");
    fs::write(base.join("json").join("clinic_b.json"), DETAILS_JSON).expect("details json");
}

#[test]
fn cli_embeds_from_a_resource_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let resources = tmp.path().join("resources");
    write_resources(&resources);

    let host = tmp.path().join("host.html");
    fs::write(&host, HOST_PAGE).expect("host page");
    let out = tmp.path().join("out.html");

    let exe = assert_cmd::cargo_bin!("clinimap-cli");
    Command::new(exe)
        .args([
            "embed",
            "--parent",
            "#clinic-map",
            "--clinic-type",
            "b",
            "--resources",
            resources.to_string_lossy().as_ref(),
            "--out",
            out.to_string_lossy().as_ref(),
            host.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let page = fs::read_to_string(&out).expect("read output");
    assert!(page.contains("East"));
    assert!(page.contains("Clinic A"));
    assert!(page.contains("<style>"));
    assert!(page.contains(&format!(r#"<div data-clinic-title>{SVG}</div>"#)));
}

#[test]
fn cli_reads_the_host_page_from_stdin() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let resources = tmp.path().join("resources");
    write_resources(&resources);

    let exe = assert_cmd::cargo_bin!("clinimap-cli");
    let output = assert_cmd::Command::new(exe)
        .args([
            "embed",
            "--parent",
            "#clinic-map",
            "--clinic-type",
            "b",
            "--resources",
            resources.to_string_lossy().as_ref(),
        ])
        .write_stdin(HOST_PAGE)
        .output()
        .expect("run");

    assert!(output.status.success());
    let page = String::from_utf8_lossy(&output.stdout);
    assert!(page.contains("clinimap-accordion"));
}

#[test]
fn cli_prints_the_scoped_stylesheet() {
    let exe = assert_cmd::cargo_bin!("clinimap-cli");
    let output = Command::new(exe)
        .args(["stylesheet", "--parent", "#m", "--main-color", "1a2b3c"])
        .output()
        .expect("run");

    assert!(output.status.success());
    let css = String::from_utf8_lossy(&output.stdout);
    assert!(css.starts_with("#m "));
    assert!(css.contains("fill:#1a2b3c;"));
}

#[test]
fn cli_rejects_a_missing_clinic_type_with_a_runtime_error() {
    let exe = assert_cmd::cargo_bin!("clinimap-cli");
    assert_cmd::Command::new(exe)
        .args(["embed", "--parent", "#m", "--resources", "."])
        .write_stdin(HOST_PAGE)
        .assert()
        .code(1);
}

#[test]
fn cli_requires_exactly_one_resource_backend() {
    let exe = assert_cmd::cargo_bin!("clinimap-cli");
    assert_cmd::Command::new(exe)
        .args(["embed", "--parent", "#m", "--clinic-type", "a"])
        .write_stdin(HOST_PAGE)
        .assert()
        .code(2);
}
