use assert_cmd::Command;
use test_support::BIN;

fn gen_man() -> std::process::Output {
  Command::cargo_bin(BIN).unwrap().arg("--gen-man").output().unwrap()
}

#[test]
fn cli_generates_man_page() {
  let out = gen_man();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  // clap_mangen emits a roff manpage starting with .TH and mentions the binary name
  assert!(s.contains(".TH") || s.contains(".Nm"));
  assert!(s.contains("saved-search"));
}

#[test]
fn man_page_lists_subcommands() {
  let out = gen_man();
  let s = String::from_utf8_lossy(&out.stdout);
  for sub in ["decode", "encode", "defaults", "filter", "summarize", "validate"] {
    assert!(s.contains(sub), "man page is missing {sub}");
  }
}
