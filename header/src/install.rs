use crate::builder::HeaderBuilder;
use crate::error::{HeaderError, Result};
use crate::macros::MacroOverride;
use crate::target::Target;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// A completely generated header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub target: Target,
    pub text: String,
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
}

/// A failed generation together with what had been rendered so far.
#[derive(Debug)]
pub struct Failure {
    pub error: HeaderError,
    pub partial: String,
}

/// Renders the header for `target`. Nothing is written to disk.
pub fn generate<I>(target: Target, overrides: I) -> std::result::Result<Artifact, Failure>
where
    I: IntoIterator<Item = MacroOverride>,
{
    let mut builder: HeaderBuilder = HeaderBuilder::new(overrides);
    builder.writelines([
        format!("// Generated by autoheader for `{target}`. Do not edit."),
        "#pragma once".to_string(),
        String::new(),
    ]);

    if let Err(error) = target.build(&mut builder) {
        return Err(Failure {
            error,
            partial: builder.render(),
        });
    }
    builder.report_unused();

    let (text, infos, warnings) = builder.into_parts();
    Ok(Artifact {
        target,
        text,
        infos,
        warnings,
    })
}

pub fn header_path(folder: &Path, object: &str) -> PathBuf {
    folder.join(format!("{object}.h"))
}

pub fn temp_path(folder: &Path, object: &str) -> PathBuf {
    folder.join(format!(".{object}.h.tmp"))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> HeaderError + '_ {
    move |source| HeaderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn create_folder(folder: &Path) -> Result<()> {
    if !folder.is_dir() {
        debug!("mkdir {}", folder.display());
        fs::create_dir_all(folder).map_err(io_error(folder))?;
    }
    Ok(())
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    let mut file: File = File::create(path).map_err(io_error(path))?;
    file.write_all(text.as_bytes()).map_err(io_error(path))?;
    file.sync_all().map_err(io_error(path))
}

/// Writes the generation result to `folder/.object.h.tmp` and, on success
/// only, renames it over `folder/object.h`.
///
/// On failure the temporary file keeps the partial render and the installed
/// header, if any, is left as it was. If the partial render cannot be written
/// either, the generation error is returned as is.
pub fn install(
    folder: &Path,
    object: &str,
    result: std::result::Result<Artifact, Failure>,
) -> Result<PathBuf> {
    let prepared: Result<()> = create_folder(folder);
    let header: PathBuf = header_path(folder, object);
    let temp: PathBuf = temp_path(folder, object);

    match result {
        Ok(artifact) => {
            prepared?;
            write_file(&temp, &artifact.text)?;
            fs::rename(&temp, &header).map_err(io_error(&header))?;
            debug!("installed {}", header.display());
            Ok(header)
        }
        Err(failure) => match prepared.and_then(|()| write_file(&temp, &failure.partial)) {
            Ok(()) => {
                error!("{}; partial header kept at {}", failure.error, temp.display());
                Err(HeaderError::Aborted {
                    partial: temp,
                    source: Box::new(failure.error),
                })
            }
            Err(io) => {
                error!("{}; partial header not written: {io}", failure.error);
                Err(failure.error)
            }
        },
    }
}
