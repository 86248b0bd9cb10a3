// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use yare::parameterized;

fn encoding(style: PropertyStyle) -> PropertyEncoding<'static> {
    PropertyEncoding {
        style,
        flag_prefix: "-P",
        env_prefix: "ORG_GRADLE_PROJECT_",
    }
}

#[test]
fn test_override_line_renders_verbatim() {
    let o = Override::line("android.defaultConfig.minSdkVersion 30");
    assert_eq!(o.render(" = "), "android.defaultConfig.minSdkVersion 30");
}

#[test]
fn test_override_setting_uses_separator() {
    let o = Override::setting("android.defaultConfig.minSdkVersion", 30);
    assert_eq!(o.render(" "), "android.defaultConfig.minSdkVersion 30");
    assert_eq!(o.render(" = "), "android.defaultConfig.minSdkVersion = 30");
}

#[test]
fn test_property_value_display() {
    assert_eq!(PropertyValue::from(true).to_string(), "true");
    assert_eq!(PropertyValue::from(21).to_string(), "21");
    assert_eq!(PropertyValue::from("abc").to_string(), "abc");
}

#[test]
fn test_parse_assignment() {
    let p: Property = "android.uniquePackageNames=true".parse().unwrap();
    assert_eq!(p.key(), "android.uniquePackageNames");
    assert_eq!(p.value(), &PropertyValue::Str("true".to_string()));

    let p: Property = "jvmArgs=-Xmx1g -Dfoo=bar".parse().unwrap();
    assert_eq!(p.key(), "jvmArgs");
    assert_eq!(p.value().to_string(), "-Xmx1g -Dfoo=bar");
}

#[test]
fn test_parse_assignment_without_equals_fails() {
    let err = "justakey".parse::<Property>().unwrap_err();
    assert!(matches!(err, HarnessError::InvalidProperty { .. }));
}

#[test]
fn test_render_flag_style() {
    let props = vec![
        Property::new("android.uniquePackageNames", true),
        Property::new("android.useAndroidX", false),
    ];
    let rendered = render_properties(&props, encoding(PropertyStyle::Flag)).unwrap();
    assert_eq!(
        rendered.args,
        vec![
            "-Pandroid.uniquePackageNames=true".to_string(),
            "-Pandroid.useAndroidX=false".to_string(),
        ]
    );
    assert!(rendered.env.is_empty());
    assert!(rendered.file_lines.is_empty());
}

#[test]
fn test_render_env_style() {
    let props = vec![Property::new("android.min-sdk", 30)];
    let rendered = render_properties(&props, encoding(PropertyStyle::Env)).unwrap();
    assert_eq!(
        rendered.env,
        vec![(
            "ORG_GRADLE_PROJECT_ANDROID_MIN_SDK".to_string(),
            "30".to_string()
        )]
    );
    assert!(rendered.args.is_empty());
}

#[test]
fn test_render_file_style() {
    let props = vec![Property::new("org.gradle.parallel", true)];
    let rendered = render_properties(&props, encoding(PropertyStyle::File)).unwrap();
    assert_eq!(rendered.file_lines, vec!["org.gradle.parallel=true".to_string()]);
}

#[parameterized(
    empty_key = { Property::new("", "x"), PropertyStyle::Flag },
    whitespace_key = { Property::new("a b", "x"), PropertyStyle::Flag },
    equals_key = { Property::new("a=b", "x"), PropertyStyle::File },
    newline_value = { Property::new("a", "x\ny"), PropertyStyle::File },
    env_slash = { Property::new("a/b", "x"), PropertyStyle::Env },
)]
fn invalid_properties_are_rejected(property: Property, style: PropertyStyle) {
    let err = render_properties(&[property], encoding(style)).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidProperty { .. }), "{err}");
}

#[test]
fn test_invalid_property_rejects_whole_batch() {
    let props = vec![Property::new("ok", 1), Property::new("bad key", 2)];
    assert!(render_properties(&props, encoding(PropertyStyle::Flag)).is_err());
}

proptest! {
    #[test]
    fn flag_rendering_preserves_order(
        keys in proptest::collection::vec("[a-z][a-zA-Z0-9._]{0,12}", 0..10)
    ) {
        let props: Vec<Property> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| Property::new(k.as_str(), i as i64))
            .collect();
        let rendered = render_properties(&props, encoding(PropertyStyle::Flag)).unwrap();
        prop_assert_eq!(rendered.args.len(), keys.len());
        for (i, (arg, key)) in rendered.args.iter().zip(keys.iter()).enumerate() {
            prop_assert_eq!(arg, &format!("-P{}={}", key, i));
        }
    }

    #[test]
    fn env_names_are_shell_safe(key in "[a-zA-Z][a-zA-Z0-9.\\-_]{0,16}") {
        let rendered =
            render_properties(&[Property::new(key.as_str(), "v")], encoding(PropertyStyle::Env))
                .unwrap();
        let (name, _) = &rendered.env[0];
        prop_assert!(name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
    }
}
