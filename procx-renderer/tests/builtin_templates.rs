use plist::Value;
use procx_core::types::{ProcessTypeEntry, TemplateVars};
use procx_renderer::{AggregateContext, BuiltinTemplates, InstanceContext, TemplateEngine};
use serde_json::json;

fn vars() -> TemplateVars {
    let mut vars = TemplateVars::new()
        .with("user", "deploy")
        .with("env", json!({"RAILS_ENV": "production", "QUOTE": "it's \"fine\" & <ok>", "WORKERS": 4}));
    vars.apply_defaults("shop");
    vars
}

fn engine(names: &[&str]) -> TemplateEngine {
    TemplateEngine::load(&BuiltinTemplates, names).expect("load builtins")
}

fn web_ctx() -> InstanceContext {
    let entry = ProcessTypeEntry::new("web", "bundle exec puma -C 'config/puma & co.rb'").unwrap();
    InstanceContext::build("shop", &entry, "web-2", 2, 5001, &vars())
}

#[test]
fn launchd_plist_parses_and_carries_instance_fields() {
    let name = "launchd/launchd.plist.tera";
    let rendered = engine(&[name]).render(name, &web_ctx()).expect("render");

    let value = Value::from_reader_xml(rendered.as_bytes()).expect("parse plist");
    let dict = value.as_dictionary().expect("plist root dict");

    assert_eq!(dict.get("Label").and_then(Value::as_string), Some("shop-web-2"));
    assert_eq!(dict.get("UserName").and_then(Value::as_string), Some("deploy"));
    assert_eq!(dict.get("KeepAlive").and_then(Value::as_boolean), Some(true));

    let args: Vec<&str> = dict
        .get("ProgramArguments")
        .and_then(Value::as_array)
        .expect("ProgramArguments array")
        .iter()
        .map(|v| v.as_string().expect("program arg as string"))
        .collect();
    assert_eq!(args, vec!["bundle", "exec", "puma", "-C", "config/puma & co.rb"]);

    let env = dict
        .get("EnvironmentVariables")
        .and_then(Value::as_dictionary)
        .expect("env dict");
    assert_eq!(env.get("PORT").and_then(Value::as_string), Some("5001"));
    assert_eq!(env.get("PS").and_then(Value::as_string), Some("shop-web.2"));
    assert_eq!(env.get("QUOTE").and_then(Value::as_string), Some("it's \"fine\" & <ok>"));
    assert_eq!(env.get("WORKERS").and_then(Value::as_string), Some("4"));
}

#[test]
fn runit_run_uses_chpst_with_env_dir() {
    let name = "runit/run.tera";
    let mut extra = vars();
    extra.insert("location", "/srv/out");
    let entry = ProcessTypeEntry::new("worker", "./bin/worker").unwrap();
    let ctx = InstanceContext::build("shop", &entry, "worker-1", 1, 5100, &extra);
    let rendered = engine(&[name]).render(name, &ctx).unwrap();
    assert!(rendered.starts_with("#!/bin/sh\n"));
    assert!(rendered.contains(
        "exec chpst -u deploy -e /srv/out/service/shop-worker-1/env ./bin/worker"
    ), "{rendered}");
}

#[test]
fn systemd_target_lists_every_unit() {
    let name = "systemd/control.target.tera";
    let ctx = AggregateContext::new("shop", &vars())
        .with("processes", vec!["shop-web.1.service", "shop-web.2.service"]);
    let rendered = engine(&[name]).render(name, &ctx).unwrap();
    assert!(rendered.contains("Wants=shop-web.1.service shop-web.2.service\n"), "{rendered}");
    assert!(rendered.contains("WantedBy=multi-user.target"));
}

#[test]
fn systemd_units_sort_environment_lines() {
    let name = "systemd/program.service.tera";
    let rendered = engine(&[name]).render(name, &web_ctx()).unwrap();
    let quote = rendered.find("Environment=\"QUOTE=").expect("QUOTE line");
    let rails = rendered.find("Environment=\"RAILS_ENV=production\"").expect("RAILS_ENV line");
    assert!(quote < rails, "env must be rendered in key order");
    assert!(rendered.contains("User=deploy"));
    assert!(rendered.contains("TimeoutStopSec=5"));
}

#[test]
fn upstart_program_is_started_by_its_process_type() {
    let name = "upstart/program.conf.tera";
    let rendered = engine(&[name]).render(name, &web_ctx()).unwrap();
    assert!(rendered.contains("start on starting shop-web\n"));
    assert!(rendered.contains("env PORT=5001\n"));
    assert!(rendered.contains("env QUOTE='it'\\''s \"fine\" & <ok>'\n"), "{rendered}");
    assert!(rendered.contains("exec bundle exec puma -C 'config/puma & co.rb'\n"));
}

#[test]
fn sysv_script_exports_port_and_ps() {
    let name = "sysv/init.sh.tera";
    let rendered = engine(&[name]).render(name, &web_ctx()).unwrap();
    assert!(rendered.contains("# Provides:          shop-web-2\n"));
    assert!(rendered.contains("export PORT=5001\n"));
    assert!(rendered.contains("export PS=shop-web.2\n"));
    assert!(rendered.contains("Usage: $0 {start|stop|status|restart}"));
}
