use crate::error::ExportError;
use std::collections::HashMap;

/// Turn a mesh name into a valid C identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, and a leading digit gets a
/// `_` prefix (e.g., `3d-cube.001` → `_3d_cube_001`). Case is preserved so
/// the array name matches the mesh name the artist chose.
pub fn sanitize_c_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 1);

    for (i, ch) in name.chars().enumerate() {
        if i == 0 && ch.is_ascii_digit() {
            result.push('_');
        }
        if ch.is_ascii_alphanumeric() || ch == '_' {
            result.push(ch);
        } else {
            result.push('_');
        }
    }

    if result.is_empty() {
        result.push_str("mesh");
    }

    result
}

/// Check a list of mesh names for identifier collisions.
///
/// Returns `Ok(())` if no collisions, or `Err(IdentifierCollision)` with
/// the first collision found. Two meshes with the same identifier would
/// overwrite each other's output files.
pub fn check_collisions(names: &[&str]) -> Result<(), ExportError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for &name in names {
        let ident = sanitize_c_identifier(name);
        if let Some(&previous) = seen.get(&ident) {
            return Err(ExportError::IdentifierCollision {
                identifier: ident,
                mesh_a: previous.to_string(),
                mesh_b: name.to_string(),
            });
        }
        seen.insert(ident, name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_simple() {
        assert_eq!(sanitize_c_identifier("Cube"), "Cube");
        assert_eq!(sanitize_c_identifier("my_mesh"), "my_mesh");
    }

    #[test]
    fn test_sanitize_special_chars() {
        assert_eq!(sanitize_c_identifier("Cube.001"), "Cube_001");
        assert_eq!(sanitize_c_identifier("my-mesh"), "my_mesh");
        assert_eq!(sanitize_c_identifier("a b"), "a_b");
    }

    #[test]
    fn test_sanitize_leading_digit() {
        assert_eq!(sanitize_c_identifier("3d-cube"), "_3d_cube");
    }

    #[test]
    fn test_sanitize_non_ascii() {
        assert_eq!(sanitize_c_identifier("tête"), "t_te");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_c_identifier(""), "mesh");
    }

    #[test]
    fn test_no_collision() {
        assert!(check_collisions(&["Cube", "cube", "Sphere"]).is_ok());
    }

    #[test]
    fn test_collision_detected() {
        let err = check_collisions(&["Cube.001", "Cube_001"]).unwrap_err();
        match err {
            ExportError::IdentifierCollision {
                identifier,
                mesh_a,
                mesh_b,
            } => {
                assert_eq!(identifier, "Cube_001");
                assert_eq!(mesh_a, "Cube.001");
                assert_eq!(mesh_b, "Cube_001");
            }
            _ => panic!("Expected IdentifierCollision error"),
        }
    }
}
