//! Table-driven tests pinning the rendered forms and the exact error text of
//! every address family.

use registry_address::{
    parse_component_source, parse_module_registry_source, parse_provider_source, parse_raw_module_source,
    ErrorCategory, LocalSource, ModuleSource, Parser, RuleGeneration,
};

/// Expected renderings of one successfully parsed registry address.
struct Rendered {
    input: &'static str,
    string: &'static str,
    display: &'static str,
    protocol: &'static str,
}

const COMPONENT_RENDERINGS: &[Rendered] = &[
    Rendered {
        input: "hashicorp/k8-cluster",
        string: "registry.terraform.io/hashicorp/k8-cluster",
        display: "hashicorp/k8-cluster",
        protocol: "hashicorp/k8-cluster",
    },
    Rendered {
        input: "hashicorp/k8-cluster//configs",
        string: "registry.terraform.io/hashicorp/k8-cluster//configs",
        display: "hashicorp/k8-cluster//configs",
        protocol: "hashicorp/k8-cluster",
    },
    Rendered {
        input: "registry.terraform.io/hashicorp/k8-cluster",
        string: "registry.terraform.io/hashicorp/k8-cluster",
        display: "hashicorp/k8-cluster",
        protocol: "hashicorp/k8-cluster",
    },
    Rendered {
        input: "terraform.registry.io/hashicorp/k8-cluster",
        string: "terraform.registry.io/hashicorp/k8-cluster",
        display: "terraform.registry.io/hashicorp/k8-cluster",
        protocol: "hashicorp/k8-cluster",
    },
    Rendered {
        input: "app.terraform.io/hashicorp/k8-cluster//path/to/dir",
        string: "app.terraform.io/hashicorp/k8-cluster//path/to/dir",
        display: "app.terraform.io/hashicorp/k8-cluster//path/to/dir",
        protocol: "hashicorp/k8-cluster",
    },
    Rendered {
        input: "HashiCorp/K8-Cluster",
        string: "registry.terraform.io/HashiCorp/K8-Cluster",
        display: "HashiCorp/K8-Cluster",
        protocol: "HashiCorp/K8-Cluster",
    },
    Rendered {
        input: "Example.com:1234/HashiCorp/K8-Cluster",
        string: "example.com:1234/HashiCorp/K8-Cluster",
        display: "example.com:1234/HashiCorp/K8-Cluster",
        protocol: "HashiCorp/K8-Cluster",
    },
    Rendered {
        input: "Испытание.com/HashiCorp/K8-Cluster",
        string: "испытание.com/HashiCorp/K8-Cluster",
        display: "испытание.com/HashiCorp/K8-Cluster",
        protocol: "HashiCorp/K8-Cluster",
    },
    Rendered {
        input: "Испытание.com:1234/HashiCorp/K8-Cluster//Foo",
        string: "испытание.com:1234/HashiCorp/K8-Cluster//Foo",
        display: "испытание.com:1234/HashiCorp/K8-Cluster//Foo",
        protocol: "HashiCorp/K8-Cluster",
    },
];

const MODULE_RENDERINGS: &[Rendered] = &[
    Rendered {
        input: "hashicorp/consul/aws",
        string: "registry.terraform.io/hashicorp/consul/aws",
        display: "hashicorp/consul/aws",
        protocol: "hashicorp/consul/aws",
    },
    Rendered {
        input: "hashicorp/consul/aws//foo",
        string: "registry.terraform.io/hashicorp/consul/aws//foo",
        display: "hashicorp/consul/aws//foo",
        protocol: "hashicorp/consul/aws",
    },
    Rendered {
        input: "registry.terraform.io/hashicorp/consul/aws",
        string: "registry.terraform.io/hashicorp/consul/aws",
        display: "hashicorp/consul/aws",
        protocol: "hashicorp/consul/aws",
    },
    Rendered {
        input: "HashiCorp/Consul/aws",
        string: "registry.terraform.io/HashiCorp/Consul/aws",
        display: "HashiCorp/Consul/aws",
        protocol: "HashiCorp/Consul/aws",
    },
    Rendered {
        input: "Example.com:1234/HashiCorp/Consul/aws",
        string: "example.com:1234/HashiCorp/Consul/aws",
        display: "example.com:1234/HashiCorp/Consul/aws",
        protocol: "HashiCorp/Consul/aws",
    },
    Rendered {
        input: "Испытание.com/HashiCorp/Consul/aws",
        string: "испытание.com/HashiCorp/Consul/aws",
        display: "испытание.com/HashiCorp/Consul/aws",
        protocol: "HashiCorp/Consul/aws",
    },
    Rendered {
        input: "Испытание.com:1234/HashiCorp/Consul/aws//Foo",
        string: "испытание.com:1234/HashiCorp/Consul/aws//Foo",
        display: "испытание.com:1234/HashiCorp/Consul/aws//Foo",
        protocol: "HashiCorp/Consul/aws",
    },
];

const REGISTRY_NAME_RULES_TEXT: &str = "must be between one and 64 characters, including ASCII letters, digits, dashes, and underscores, where dashes and underscores may not be the prefix or suffix";

#[test]
fn component_renderings() {
    for case in COMPONENT_RENDERINGS {
        let source = parse_component_source(case.input)
            .unwrap_or_else(|e| panic!("{}: unexpected error: {e}", case.input));
        assert_eq!(source.to_string(), case.string, "{}", case.input);
        assert_eq!(source.for_display(), case.display, "{}", case.input);
        assert_eq!(source.for_registry_protocol(), case.protocol, "{}", case.input);
    }
}

#[test]
fn module_registry_renderings() {
    for case in MODULE_RENDERINGS {
        let source = parse_module_registry_source(case.input)
            .unwrap_or_else(|e| panic!("{}: unexpected error: {e}", case.input));
        assert_eq!(source.to_string(), case.string, "{}", case.input);
        assert_eq!(source.for_display(), case.display, "{}", case.input);
        assert_eq!(source.for_registry_protocol(), case.protocol, "{}", case.input);
    }
}

#[test]
fn component_errors() {
    let namespace_err = format!(r#"invalid namespace "boop!": {REGISTRY_NAME_RULES_TEXT}"#);
    let name_err = format!(r#"invalid component name "no-no-no!": {REGISTRY_NAME_RULES_TEXT}"#);
    let cases: &[(&str, &str)] = &[
        (
            "---.com/HashiCorp/K8-Cluster",
            r#"invalid component registry hostname "---.com"; internationalized domain names must be given as direct unicode characters, not in punycode"#,
        ),
        (
            "example\u{3002}xn--p1ai/hashicorp/name",
            "invalid component registry hostname \"example\u{3002}xn--p1ai\"; internationalized domain names must be given as direct unicode characters, not in punycode",
        ),
        (
            "\u{ff58}\u{ff4e}--80akhbyknj4f.com/HashiCorp/K8-Cluster",
            "invalid component registry hostname \"\u{ff58}\u{ff4e}--80akhbyknj4f.com\"; internationalized domain names must be given as direct unicode characters, not in punycode",
        ),
        ("foo/var/baz", "invalid component registry hostname: must contain at least one dot"),
        ("boop!/var", namespace_err.as_str()),
        ("hashicorp/no-no-no!", name_err.as_str()),
        (
            "foo.com/var",
            "source address must have two more components after the hostname: the namespace and the name",
        ),
        ("foo/var?otherthing", "component registry addresses may not include a query string portion"),
        (
            "github.com/HashiCorp/K8-Cluster",
            r#"can't use "github.com" as a component registry host, because it's reserved for installing directly from version control repositories"#,
        ),
        (
            "bitbucket.org/HashiCorp/K8-Cluster",
            r#"can't use "bitbucket.org" as a component registry host, because it's reserved for installing directly from version control repositories"#,
        ),
        (
            "gitlab.com/HashiCorp/K8-Cluster",
            r#"can't use "gitlab.com" as a component registry host, because it's reserved for installing directly from version control repositories"#,
        ),
        (
            "./boop",
            "source address must have two more components after the hostname: the namespace and the name",
        ),
        (
            "../boop",
            "source address must have two more components after the hostname: the namespace and the name",
        ),
        (
            "hashicorp/k8-cluster//../nope",
            r#"subdirectory path "../nope" leads outside of the component package"#,
        ),
        ("boop", "a component registry source address must have either two or three slash-separated segments"),
        (
            "registry.terraform.io/hashicorp/k8-cluster/extra/segment",
            "a component registry source address must have either two or three slash-separated segments",
        ),
    ];

    for (input, want) in cases {
        let err = parse_component_source(input).expect_err(input);
        assert_eq!(err.to_string(), *want, "{input}");
    }
}

#[test]
fn module_registry_errors() {
    let long_target = format!("{}h", "a".repeat(120));
    let long_input = format!("foo/var/{long_target}");
    let long_err = format!(r#"invalid target system "{long_target}": must be between one and 64 ASCII letters or digits"#);
    let namespace_err = format!(r#"invalid namespace "boop!": {REGISTRY_NAME_RULES_TEXT}"#);
    let cases: &[(&str, &str)] = &[
        (
            "---.com/HashiCorp/Consul/aws",
            r#"invalid module registry hostname "---.com"; internationalized domain names must be given as direct unicode characters, not in punycode"#,
        ),
        (
            "\u{ff58}\u{ff4e}--80akhbyknj4f.com/hashicorp/subnets/cidr",
            "invalid module registry hostname \"\u{ff58}\u{ff4e}--80akhbyknj4f.com\"; internationalized domain names must be given as direct unicode characters, not in punycode",
        ),
        (
            "example\u{ff61}xn--p1ai/hashicorp/subnets/cidr",
            "invalid module registry hostname \"example\u{ff61}xn--p1ai\"; internationalized domain names must be given as direct unicode characters, not in punycode",
        ),
        ("foo/var/baz/qux", "invalid module registry hostname: must contain at least one dot"),
        (
            "foo/var/no-no-no",
            r#"invalid target system "no-no-no": must be between one and 64 ASCII letters or digits"#,
        ),
        (long_input.as_str(), long_err.as_str()),
        ("boop!/var/baz", namespace_err.as_str()),
        (
            "foo.com/var/baz",
            "source address must have three more components after the hostname: the namespace, the name, and the target system",
        ),
        ("foo/var/baz?otherthing", "module registry addresses may not include a query string portion"),
        (
            "github.com/HashiCorp/Consul/aws",
            r#"can't use "github.com" as a module registry host, because it's reserved for installing directly from version control repositories"#,
        ),
        (
            "bitbucket.org/HashiCorp/Consul/aws",
            r#"can't use "bitbucket.org" as a module registry host, because it's reserved for installing directly from version control repositories"#,
        ),
        ("./boop", r#"can't use local directory "./boop" as a module registry address"#),
        ("../boop", r#"can't use local directory "../boop" as a module registry address"#),
    ];

    for (input, want) in cases {
        let err = parse_module_registry_source(input).expect_err(input);
        assert_eq!(err.to_string(), *want, "{input}");
    }
}

#[test]
fn module_source_dispatch() {
    let locals = [
        ("./child", "./child"),
        ("./nope/../child", "./child"),
        ("../sibling", "../sibling"),
        ("./nope/../../sibling", "../sibling"),
        (r".\child", "./child"),
        (r".\nope\..\child", "./child"),
        (r"..\sibling", "../sibling"),
        (r".\nope\..\..\sibling", "../sibling"),
        (r"./nope\nope/why\./please\don't", "./nope/nope/why/please/don't"),
    ];
    for (input, want) in locals {
        let source = parse_raw_module_source(input).unwrap();
        assert_eq!(source, ModuleSource::Local(LocalSource::parse(want).unwrap()), "{input}");
        assert_eq!(source.to_string(), want, "{input}");
    }

    let registries = [
        ("hashicorp/subnets/cidr", "registry.terraform.io/hashicorp/subnets/cidr", None),
        (
            "hashicorp/subnets/cidr//examples/foo",
            "registry.terraform.io/hashicorp/subnets/cidr",
            Some("examples/foo"),
        ),
        ("example.com/awesomecorp/network/happycloud", "example.com/awesomecorp/network/happycloud", None),
        (
            "example.com/awesomecorp/network/happycloud//examples/foo",
            "example.com/awesomecorp/network/happycloud",
            Some("examples/foo"),
        ),
    ];
    for (input, package, subdir) in registries {
        let ModuleSource::Registry(source) = parse_raw_module_source(input).unwrap() else {
            panic!("{input}: expected a registry source");
        };
        assert_eq!(source.package().to_string(), package, "{input}");
        assert_eq!(source.subdir(), subdir, "{input}");
    }

    let err = parse_raw_module_source("example\u{3002}xn--p1ai/a/b/c").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Hostname);

    for input in ["hashicorp/subnets/cidr//../nope", "boop/bloop"] {
        let err = parse_raw_module_source(input).unwrap_err();
        assert_eq!(err.to_string(), format!("unsupported module source {input:?}"));
        assert_eq!(err.category(), ErrorCategory::Unsupported);
    }
}

#[test]
fn provider_sources_under_both_generations() {
    let legacy = Parser::new().with_provider_rules(RuleGeneration::Legacy);
    let current = Parser::new();

    let accepted = [
        ("registry.terraform.io/hashicorp/aws", "registry.terraform.io/hashicorp/aws"),
        ("registry.Terraform.io/HashiCorp/AWS", "registry.terraform.io/hashicorp/aws"),
        ("terraform.io/builtin/terraform", "terraform.io/builtin/terraform"),
        ("terraform", "registry.terraform.io/?/terraform"),
        ("hashicorp/aws", "registry.terraform.io/hashicorp/aws"),
        ("HashiCorp/AWS", "registry.terraform.io/hashicorp/aws"),
        ("aws", "registry.terraform.io/?/aws"),
        ("AWS", "registry.terraform.io/?/aws"),
        ("example.com/foo-bar/baz-boop", "example.com/foo-bar/baz-boop"),
        ("foo-bar/baz-boop", "registry.terraform.io/foo-bar/baz-boop"),
        ("localhost:8080/foo/bar", "localhost:8080/foo/bar"),
    ];
    for (input, want) in accepted {
        let provider = legacy.parse_provider_source(input).unwrap();
        assert_eq!(provider.to_string(), want, "{input}");
        assert!(current.parse_provider_source(input).is_ok(), "{input}");
    }

    let rejected_by_both = [
        "example.com/too/many/parts/here",
        "/too///many//slashes",
        "///",
        "/ / /",
        "badhost!/hashicorp/aws",
        "example.com/badnamespace!/aws",
        "example.com/-badnamespace/aws",
        "example.com/badnamespace-/aws",
        "example.com/bad.namespace/aws",
        "example.com/hashicorp/badtype!",
        "example.com/hashicorp/-badtype",
        "example.com/hashicorp/badtype-",
        "example.com/hashicorp/bad.type",
        "example.com/hashicorp/terraform-provider-bad",
        "example.com/hashicorp/terraform-bad",
    ];
    for input in rejected_by_both {
        assert!(legacy.parse_provider_source(input).is_err(), "{input}");
        assert!(parse_provider_source(input).is_err(), "{input}");
    }

    for input in ["example.com/bad--namespace/aws", "example.com/hashicorp/bad--type"] {
        assert!(legacy.parse_provider_source(input).is_err(), "{input}");
        assert!(current.parse_provider_source(input).is_ok(), "{input}");
    }
}
