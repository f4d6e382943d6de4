//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use tilecollapse::CollapseError;
    use tilecollapse::io::error::{illegal_driver_state, illegal_state, invalid_configuration};
    use tilecollapse::spatial::{Alphabet, Grid};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = CollapseError::FileSystem {
            path: "/tmp/tiles".into(),
            operation: "read tile directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read tile directory"));
        assert!(error.to_string().contains("/tmp/tiles"));
    }

    // Tests InvalidConfiguration error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_configuration_error() {
        let error = invalid_configuration("width", &0, &"must be greater than zero");

        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains('0'));
        assert!(message.contains("must be greater than zero"));
        assert!(error.source().is_none());
    }

    // Tests contradiction and illegal state messages name the cell
    // Verified by swapping row and column in the message
    #[test]
    fn test_position_messages() {
        let contradiction = CollapseError::Contradiction { position: [3, 4] };
        assert!(contradiction.to_string().contains("(3, 4)"));
        assert!(contradiction.is_contradiction());

        let illegal = illegal_state("collapse", [1, 2], &"cell already collapsed");
        let message = illegal.to_string();
        assert!(message.contains("collapse"));
        assert!(message.contains("(1, 2)"));
        assert!(!illegal.is_contradiction());
    }

    // Tests driver-level illegal states name no cell
    // Verified by reporting the origin cell for an empty frontier
    #[test]
    fn test_driver_state_message_has_no_cell() {
        let error = illegal_driver_state("select", &"frontier is empty with 5 cells remaining");

        assert!(matches!(
            error,
            CollapseError::IllegalState {
                operation: "select",
                position: None,
                ..
            }
        ));
        let message = error.to_string();
        assert!(message.contains("no cell involved"));
        assert!(message.contains("5 cells remaining"));
        assert!(!message.contains("(0, 0)"));
    }

    // Tests exhaustion reports counts and keeps the restored grid
    // Verified by dropping the remaining count from the message
    #[test]
    fn test_contradiction_exhausted() {
        let alphabet = Alphabet::from_labels(["AAAA"]).expect("valid alphabet");
        let grid = Grid::initialise(2, 2, &alphabet).expect("valid grid");
        let error = CollapseError::ContradictionExhausted {
            rollbacks: 101,
            remaining: 4,
            grid: Box::new(grid),
        };

        let message = error.to_string();
        assert!(message.contains("101"));
        assert!(message.contains('4'));
        assert!(!error.is_contradiction());
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = CollapseError::ImageExport {
            path: PathBuf::from("/readonly/canvas.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/readonly/canvas.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests conversions from library errors
    // Verified by mapping io errors to ImageExport
    #[test]
    fn test_from_conversions() {
        let io_error = std::io::Error::other("disk full");
        assert!(matches!(
            CollapseError::from(io_error),
            CollapseError::FileSystem { .. }
        ));

        let image_error = image::ImageError::IoError(std::io::Error::other("truncated"));
        assert!(matches!(
            CollapseError::from(image_error),
            CollapseError::TileSetLoad { .. }
        ));
    }
}
