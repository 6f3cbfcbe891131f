use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use gbp_db::{Diagnostic, File, check_file};
use gbp_errors::Renderer;
use salsa::DatabaseImpl;

#[derive(Parser)]
enum Options {
    /// Parse a header and report anomalies without writing anything.
    Check { path: Utf8PathBuf },
    /// Generate boilerplate next to the input: `foo.hpp` becomes
    /// `foo.gbp.hpp` and `foo.gbp.cpp`.
    Generate {
        path: Utf8PathBuf,
        /// Print the generated code instead of writing files.
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> anyhow::Result<()> {
    match Options::parse() {
        Options::Check { path } => {
            let db = DatabaseImpl::default();
            let file = load(&db, path)?;
            report(&db, file);
            Ok(())
        }
        Options::Generate { path, stdout } => {
            let db = DatabaseImpl::default();
            let file = load(&db, path)?;
            report(&db, file);

            let code = file.generate(&db);
            if stdout {
                println!("{}", code.decl);
                println!("{}", code.impl_);
            } else {
                let path = file.path(&db);
                let decl_path = path.with_extension("gbp.hpp");
                std::fs::write(&decl_path, format!("{}\n", code.decl))
                    .with_context(|| format!("failed to write `{decl_path}`"))?;
                let impl_path = path.with_extension("gbp.cpp");
                std::fs::write(&impl_path, format!("{}\n", code.impl_))
                    .with_context(|| format!("failed to write `{impl_path}`"))?;
            }
            Ok(())
        }
    }
}

fn load(db: &DatabaseImpl, path: Utf8PathBuf) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
    Ok(File::new(db, path, text))
}

fn report(db: &DatabaseImpl, file: File) {
    let renderer = Renderer::styled();
    let path = file.path(db).as_str();
    let text = file.text(db);

    for diagnostic in check_file::accumulated::<Diagnostic>(db, file) {
        eprintln!("{}", diagnostic.render(&renderer, path, text));
    }
}
