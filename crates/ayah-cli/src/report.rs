use ayah_fetch::UpstreamError;
use ayah_model::ReferenceError;
use ayah_render::SaveError;

/// User-facing category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Input,
    Network,
    File,
    Unexpected,
}

impl Category {
    pub fn of(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<ReferenceError>().is_some() {
            Self::Input
        } else if err.downcast_ref::<UpstreamError>().is_some() {
            Self::Network
        } else if err.downcast_ref::<SaveError>().is_some() {
            Self::File
        } else {
            Self::Unexpected
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Input => "Input Error",
            Self::Network => "Network Error",
            Self::File => "File Error",
            Self::Unexpected => "Unexpected Error",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::Input => "Use --help for usage information.",
            Self::Network => "Please check your internet connection and try again.",
            Self::File => "Check that the output directory exists and is writable.",
            Self::Unexpected => "Please try again or report this issue.",
        }
    }
}

/// One-line message: `"{label}: {error}"`, with the context chain for
/// unexpected errors.
pub fn describe(err: &anyhow::Error) -> String {
    let category = Category::of(err);
    match category {
        Category::Unexpected => format!("{}: {err:#}", category.label()),
        _ => format!("{}: {err}", category.label()),
    }
}

/// Print a failure and its hint to stderr.
pub fn report(err: &anyhow::Error) {
    tracing::debug!(error = ?err, "Command failed");
    eprintln!("{}", describe(err));
    eprintln!("{}", Category::of(err).hint());
}
