//! End-to-end pass over the driver: compile a package through a stub
//! toolchain that behaves like the real backend (drops an object and an
//! interface into the output directory), then query the metadata back.

use fado_driver::{BuildSystem, Conf, Fixity, ModuleName, NativePackage};
use pretty_assertions::assert_eq;
use std::fs;

const BACKEND_STUB: &str = r#"touch demo.app.o
{
printf '#!fado:1\n'
printf 'module = "demo.app"\n'
printf 'fingerprint = "feed"\n'
printf '[[ops]]\n'
printf 'symbol = "<>"\n'
printf 'fixity = "right"\n'
printf 'prec = 6\n'
} > demo.app.fdi"#;

#[test]
fn build_then_query_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("demo.app.c");
    fs::write(&src, "int fado_demo_app;\n").unwrap();
    let out_dir = dir.path().join("build");

    let build_sys = BuildSystem::with_conf(Conf {
        toolchain: "sh".to_string(),
        toolchain_args: vec!["-c".to_string(), BACKEND_STUB.to_string(), "fadocc".to_string()],
        search_path: vec![out_dir.clone()],
    });

    let pack = NativePackage {
        name: "demo".to_string(),
        srcs: vec![src],
        search_path: Vec::new(),
        out_dir: out_dir.clone(),
    };
    let objects = build_sys.compile_package(&pack).unwrap();
    assert_eq!(objects, vec![out_dir.join("demo.app.o")]);
    assert!(objects[0].is_file());

    let meta = build_sys.module_meta(&ModuleName::new("demo.app")).unwrap().unwrap();
    assert_eq!(meta.fingerprint, "feed");

    let ops = build_sys.exported_operators(&ModuleName::new("demo.app")).unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].symbol, "<>");
    assert_eq!(ops[0].fixity, Fixity::Right);
    assert_eq!(ops[0].to_string(), "infixr 6 <>");
}
