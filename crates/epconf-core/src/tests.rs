use super::*;

const SAMPLE_INI: &str = "[PHP]
; Maximum execution time of each script, in seconds
max_execution_time = 30
memory_limit=128M
;extension=bz2
extension=php_curl.dll
extension=php_gd2.dll

[curl]
;curl.cainfo =
";

#[test]
fn default_catalog_keeps_exif_after_mbstring() {
    let catalog = ExtensionCatalog::default();
    let mbstring = catalog.position("mbstring").expect("mbstring is cataloged");
    let exif = catalog.position("exif").expect("exif is cataloged");
    assert!(
        mbstring < exif,
        "exif depends on mbstring being loaded first"
    );
}

#[test]
fn default_catalog_enables_expected_extensions_in_order() {
    let names = ExtensionCatalog::default().extension_names(&PhpVersion::new(8, 0, 0));
    assert_eq!(
        names,
        vec![
            "bz2",
            "curl",
            "gd2",
            "gettext",
            "mbstring",
            "exif",
            "mysqli",
            "openssl",
            "pdo_mysql",
            "pdo_sqlite",
            "sockets",
            "sqlite3",
            "xsl",
        ]
    );
}

#[test]
fn legacy_versions_get_prefixed_extension_names() {
    let names = ExtensionCatalog::default().extension_names(&PhpVersion::new(7, 2, 0));
    assert_eq!(names.first().map(String::as_str), Some("php_bz2"));
    assert!(names.iter().all(|name| name.starts_with("php_")));
}

#[test]
fn threshold_version_uses_bare_extension_names() {
    let catalog = ExtensionCatalog::default();
    let at_threshold = catalog.extension_names(&PhpVersion::new(7, 4, 0));
    assert!(at_threshold.iter().all(|name| !name.starts_with("php_")));

    let just_below = catalog.extension_names(&PhpVersion::new(7, 3, 33));
    assert!(just_below.iter().all(|name| name.starts_with("php_")));
}

#[test]
fn disabled_extensions_are_never_emitted() {
    let catalog = ExtensionCatalog::from_entries([
        ExtensionEntry::new("zip", false),
        ExtensionEntry::new("mbstring", true),
        ExtensionEntry::new("intl", false),
        ExtensionEntry::new("exif", true),
    ]);

    assert_eq!(
        catalog.extension_names(&PhpVersion::new(5, 6, 40)),
        vec!["php_mbstring", "php_exif"]
    );
    assert_eq!(
        catalog.extension_names(&PhpVersion::new(8, 2, 0)),
        vec!["mbstring", "exif"]
    );
}

#[test]
fn php_version_pads_missing_components() {
    let version = PhpVersion::parse("7.2").expect("must parse");
    assert_eq!(version, PhpVersion::new(7, 2, 0));
    assert_eq!(version.to_string(), "7.2.0");
    assert_eq!(
        PhpVersion::parse("8").expect("must parse"),
        PhpVersion::new(8, 0, 0)
    );
}

#[test]
fn php_version_ignores_trailing_text() {
    let version = PhpVersion::parse("  7.2.10 x64 (nts)").expect("must parse");
    assert_eq!(version, PhpVersion::new(7, 2, 10));
    assert_eq!(version.major(), 7);
    assert_eq!(version.minor(), 2);
}

#[test]
fn php_version_compares_components_not_decimals() {
    let newer: PhpVersion = "7.10".parse().expect("must parse");
    let threshold: PhpVersion = "7.4".parse().expect("must parse");
    assert!(newer > threshold);
    assert!(!newer.uses_legacy_extension_names());
}

#[test]
fn php_version_rejects_non_numeric_input() {
    let err = PhpVersion::parse("unknown").expect_err("must reject");
    assert!(
        err.to_string().contains("no numeric version"),
        "unexpected error: {err}"
    );
    assert!(PhpVersion::parse("7..2").is_err());
}

#[test]
fn labeled_line_requires_matching_label() {
    assert_eq!(
        PhpVersion::parse_labeled_line("Version: 7.2", "Version:"),
        Some(PhpVersion::new(7, 2, 0))
    );
    assert_eq!(
        PhpVersion::parse_labeled_line("   Version:8.0.30", "Version:"),
        Some(PhpVersion::new(8, 0, 30))
    );
    assert_eq!(
        PhpVersion::parse_labeled_line("Build: 7.2", "Version:"),
        None
    );
    assert_eq!(
        PhpVersion::parse_labeled_line("Version: n/a", "Version:"),
        None
    );
}

#[test]
fn resource_limit_defaults() {
    let limits = ResourceLimits::default();
    assert_eq!(limits.max_execution_time, 90);
    assert_eq!(limits.memory_limit, "600M");
    assert_eq!(limits.upload_max_filesize, "200M");
    assert_eq!(limits.post_max_size, "200M");
}

#[test]
fn resource_limits_accept_partial_overrides() {
    let limits: ResourceLimits =
        toml::from_str("memory_limit = \"1G\"\n").expect("limits should parse");
    assert_eq!(limits.memory_limit, "1G");
    assert_eq!(limits.max_execution_time, 90);
    assert_eq!(limits.post_max_size, "200M");
}

#[test]
fn untouched_document_renders_byte_identical() {
    let doc = IniDocument::parse(SAMPLE_INI);
    assert_eq!(doc.render(), SAMPLE_INI);

    let crlf = SAMPLE_INI.replace('\n', "\r\n");
    assert_eq!(IniDocument::parse(&crlf).render(), crlf);

    let no_final_newline = "[PHP]\nmemory_limit = 1G";
    assert_eq!(
        IniDocument::parse(no_final_newline).render(),
        no_final_newline
    );
}

#[test]
fn reads_values_by_section() {
    let doc = IniDocument::parse(SAMPLE_INI);
    assert!(doc.section_exists("PHP"));
    assert!(doc.section_exists("curl"));
    assert!(!doc.section_exists("EPConf"));
    assert!(doc.section_exists(GLOBAL_SECTION));

    assert_eq!(doc.value("PHP", "max_execution_time"), Some("30"));
    assert_eq!(doc.value("PHP", "memory_limit"), Some("128M"));
    assert_eq!(
        doc.values("PHP", "extension"),
        vec!["php_curl.dll", "php_gd2.dll"]
    );
    assert_eq!(doc.value("curl", "curl.cainfo"), None);
    assert_eq!(doc.value("curl", "memory_limit"), None);
}

#[test]
fn scalar_set_keeps_existing_spelling() {
    let mut doc = IniDocument::parse(SAMPLE_INI);
    doc.set("PHP", "max_execution_time", 90_u32);
    doc.set("PHP", "memory_limit", "600M");

    let rendered = doc.render();
    assert!(rendered.contains("\nmax_execution_time = 90\n"));
    assert!(rendered.contains("\nmemory_limit=600M\n"));
    assert!(rendered.contains("; Maximum execution time of each script, in seconds\n"));
}

#[test]
fn scalar_set_collapses_duplicate_entries() {
    let mut doc = IniDocument::parse(
        "[PHP]\nmemory_limit = 64M\nshort_open_tag = Off\nmemory_limit = 128M\n",
    );
    doc.set("PHP", "memory_limit", "600M");
    assert_eq!(
        doc.render(),
        "[PHP]\nmemory_limit = 600M\nshort_open_tag = Off\n"
    );
}

#[test]
fn list_set_replaces_active_entries_and_keeps_comments() {
    let mut doc = IniDocument::parse(SAMPLE_INI);
    doc.set(
        "PHP",
        "extension",
        vec![
            "bz2".to_string(),
            "curl".to_string(),
            "mbstring".to_string(),
        ],
    );

    assert_eq!(
        doc.render(),
        "[PHP]
; Maximum execution time of each script, in seconds
max_execution_time = 30
memory_limit=128M
;extension=bz2
extension=bz2
extension=curl
extension=mbstring

[curl]
;curl.cainfo =
"
    );
}

#[test]
fn missing_key_goes_after_last_entry_of_section() {
    let mut doc = IniDocument::parse(SAMPLE_INI);
    doc.set("PHP", "post_max_size", "200M");
    doc.set("curl", "curl.cainfo", "/opt/easyphp/cacert.pem");

    assert_eq!(
        doc.render(),
        "[PHP]
; Maximum execution time of each script, in seconds
max_execution_time = 30
memory_limit=128M
;extension=bz2
extension=php_curl.dll
extension=php_gd2.dll
post_max_size=200M

[curl]
curl.cainfo=/opt/easyphp/cacert.pem
;curl.cainfo =
"
    );
}

#[test]
fn missing_section_is_appended_after_blank_line() {
    let mut doc = IniDocument::parse(SAMPLE_INI);
    doc.set("EPConf", "rewritten", 1_u32);

    let rendered = doc.render();
    assert!(rendered.ends_with(";curl.cainfo =\n\n[EPConf]\nrewritten=1\n"));
    assert!(doc.section_exists("EPConf"));
    assert_eq!(doc.value("EPConf", "rewritten"), Some("1"));
}

#[test]
fn set_on_empty_document_builds_section() {
    let mut doc = IniDocument::parse("");
    assert_eq!(doc.render(), "");

    doc.set("openssl", "openssl.cafile", "/srv/cacert.pem");
    assert_eq!(doc.render(), "[openssl]\nopenssl.cafile=/srv/cacert.pem\n");
}

#[test]
fn crlf_documents_keep_crlf_for_new_lines() {
    let mut doc = IniDocument::parse("[PHP]\r\nmemory_limit = 128M\r\n");
    doc.set("PHP", "memory_limit", "600M");
    doc.set("EPConf", "rewritten", 1_u32);
    assert_eq!(
        doc.render(),
        "[PHP]\r\nmemory_limit = 600M\r\n\r\n[EPConf]\r\nrewritten=1\r\n"
    );
}

#[test]
fn mixed_line_endings_survive_untouched_lines() {
    let mixed = "[PHP]\r\nengine = On\nmemory_limit = 128M\r\n";
    assert_eq!(IniDocument::parse(mixed).render(), mixed);

    let mut doc = IniDocument::parse(mixed);
    doc.set("PHP", "engine", "Off");
    doc.set("EPConf", "rewritten", 1_u32);
    assert_eq!(
        doc.render(),
        "[PHP]\r\nengine = Off\nmemory_limit = 128M\r\n\r\n[EPConf]\r\nrewritten=1\r\n"
    );
}

#[test]
fn missing_final_newline_stays_missing_after_append() {
    let mut doc = IniDocument::parse("[PHP]\nmemory_limit = 1G");
    doc.set("EPConf", "rewritten", 1_u32);
    assert_eq!(
        doc.render(),
        "[PHP]\nmemory_limit = 1G\n\n[EPConf]\nrewritten=1"
    );
}

#[test]
fn byte_order_mark_does_not_hide_first_section() {
    let with_bom = "\u{feff}[PHP]\nmemory_limit = 128M\n";
    assert_eq!(IniDocument::parse(with_bom).render(), with_bom);

    let mut doc = IniDocument::parse(with_bom);
    assert!(doc.section_exists("PHP"));
    assert_eq!(doc.value("PHP", "memory_limit"), Some("128M"));

    doc.set("PHP", "memory_limit", "600M");
    assert_eq!(doc.render(), "\u{feff}[PHP]\nmemory_limit = 600M\n");
}

#[test]
fn global_entries_are_addressed_without_section() {
    let mut doc = IniDocument::parse("engine = On\n\n[PHP]\nengine = Off\n");
    assert_eq!(doc.value(GLOBAL_SECTION, "engine"), Some("On"));

    doc.set(GLOBAL_SECTION, "zend.enable_gc", "On");
    assert_eq!(
        doc.render(),
        "engine = On\nzend.enable_gc=On\n\n[PHP]\nengine = Off\n"
    );
}

#[test]
fn load_and_save_round_trip_through_disk() {
    let path = std::env::temp_dir().join(format!(
        "epconf-core-ini-{}-{}.ini",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos()
    ));
    std::fs::write(&path, SAMPLE_INI).expect("must seed ini");

    let mut doc = IniDocument::load(&path).expect("must load");
    doc.set("PHP", "memory_limit", "600M");
    doc.save(&path).expect("must save");

    let reloaded = IniDocument::load(&path).expect("must reload");
    assert_eq!(reloaded.value("PHP", "memory_limit"), Some("600M"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("epconf-core-definitely-missing.ini");
    let err = IniDocument::load(&path).expect_err("missing file must fail");
    assert!(err.to_string().contains("failed to read ini file"));
}
