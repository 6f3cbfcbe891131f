//! The incremental layer: a source file as a salsa input, with parsing and
//! code generation as tracked queries over it.

use camino::Utf8PathBuf;
use gbp_codegen::Code;
use gbp_context::ContextTree;
pub use gbp_errors::Diagnostic;
use salsa::Database;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn parse(self, db: &dyn Database) -> ContextTree {
        gbp_parse::header(db, self.text(db))
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn generate(self, db: &dyn Database) -> Code {
        gbp_codegen::file(self.parse(db))
    }
}

#[salsa::tracked]
pub fn check_file(db: &dyn Database, file: File) {
    _ = file.generate(db);
}

#[cfg(test)]
mod tests {
    use gbp_errors::Severity;
    use salsa::{DatabaseImpl, Setter as _};

    use super::*;

    fn file(db: &DatabaseImpl, text: &str) -> File {
        File::new(db, "test.hpp".into(), text.into())
    }

    #[test]
    fn parse_and_generate_through_the_database() {
        let db = DatabaseImpl::default();
        let file = file(&db, "struct P {\n    GBP_DECLARE_TYPE(P, (int)(x))\n};\n");

        let tree = file.parse(&db);
        assert_eq!(tree.name(tree.children(tree.root())[0]), "P");

        let code = file.generate(&db);
        assert!(code.decl.contains("int x;"));
        assert!(code.impl_.contains("P::member_name<0>"));
    }

    #[test]
    fn unterminated_constructs_surface_as_warnings() {
        let db = DatabaseImpl::default();
        let file = file(&db, "struct Broken {");
        check_file(&db, file);

        let diagnostics = check_file::accumulated::<Diagnostic>(&db, file);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), Severity::Warning);
        assert!(diagnostics[0].message().contains("Struct"));
    }

    #[test]
    fn well_formed_files_have_no_diagnostics() {
        let db = DatabaseImpl::default();
        let file = file(&db, "struct P {\n    GBP_DECLARE_TYPE(P, (int)(x))\n};\n");
        check_file(&db, file);

        assert!(check_file::accumulated::<Diagnostic>(&db, file).is_empty());
    }

    #[test]
    fn edits_invalidate_generated_code() {
        let mut db = DatabaseImpl::default();
        let file = file(&db, "struct A {\n    GBP_DECLARE_TYPE(A, (int)(x))\n};\n");
        assert!(file.generate(&db).decl.contains("int x;"));

        file.set_text(&mut db).to("struct A {\n    GBP_DECLARE_TYPE(A, (long)(y))\n};\n".into());
        assert!(file.generate(&db).decl.contains("long y;"));
        assert!(!file.generate(&db).decl.contains("int x;"));
    }
}
