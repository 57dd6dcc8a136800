//! Workspace - the currently open project
//!
//! A workspace is either empty (no project yet) or holds one active project.
//! New and loaded projects are built completely before they replace the
//! current one, so a failed load leaves the previous project as it was.

use std::path::Path;

use log::{info, warn};

use super::project::Project;
use crate::engine::Canvas;
use crate::error::{CollageError, Result};
use crate::formats;

#[derive(Debug, Default)]
pub struct Workspace {
    project: Option<Project>,
}

impl Workspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        Self { project: None }
    }

    /// Whether a project is open
    pub fn is_active(&self) -> bool {
        self.project.is_some()
    }

    pub fn project(&self) -> Result<&Project> {
        self.project.as_ref().ok_or(CollageError::NoActiveProject)
    }

    pub fn project_mut(&mut self) -> Result<&mut Project> {
        self.project.as_mut().ok_or(CollageError::NoActiveProject)
    }

    /// Install `project` as the active one, returning the previous project
    pub fn replace(&mut self, project: Project) -> Option<Project> {
        self.project.replace(project)
    }

    /// Start a fresh project with a single background layer
    pub fn new_project(&mut self, height: i64, width: i64, max_value: i64) -> Result<()> {
        let project = Project::new(height, width, max_value)?;
        self.replace(project);
        Ok(())
    }

    /// Load a collage file and make it the active project
    pub fn load_project(&mut self, path: &Path) -> Result<()> {
        match formats::read_collage(path) {
            Ok(project) => {
                self.replace(project);
                Ok(())
            }
            Err(e) => {
                warn!("Load of {} failed, keeping current project: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Save the active project as a collage file
    pub fn save_project(&self, path: &Path) -> Result<()> {
        let project = self.project()?;
        formats::save_collage(project, path)?;
        info!("Saved project to {}", path.display());
        Ok(())
    }

    /// Render the active project and write the result as `format`
    pub fn save_image(&mut self, path: &Path, format: &str) -> Result<Canvas> {
        let project = self.project_mut()?;
        let canvas = project.render();
        formats::export_image(&canvas, project.max_value(), path, format)?;
        info!("Saved {} image to {}", format, path.display());
        Ok(canvas)
    }

    /// Load an image file and place it on a layer of the active project
    pub fn add_image_to_layer(
        &mut self,
        x: i64,
        y: i64,
        image_path: &Path,
        layer: &str,
    ) -> Result<usize> {
        let project = self.project_mut()?;
        // resolve the layer first so a bad name does not cost a decode
        project.layer_position(layer)?;
        let image = formats::load_image(image_path)?;
        project.add_image(x, y, &image, layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Pixel;
    use crate::filters::Filter;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_empty_workspace_rejects_operations() {
        let mut workspace = Workspace::new();
        assert!(!workspace.is_active());
        assert!(matches!(workspace.project(), Err(CollageError::NoActiveProject)));
        assert!(matches!(
            workspace.save_project(Path::new("x.collage")),
            Err(CollageError::NoActiveProject)
        ));
        assert!(matches!(
            workspace.add_image_to_layer(0, 0, Path::new("x.ppm"), "background"),
            Err(CollageError::NoActiveProject)
        ));
    }

    #[test]
    fn test_new_project_replaces_previous() {
        let mut workspace = Workspace::new();
        workspace.new_project(2, 2, 255).unwrap();
        workspace
            .project_mut()
            .unwrap()
            .add_layer("extra", Filter::Normal)
            .unwrap();

        workspace.new_project(3, 4, 255).unwrap();

        let project = workspace.project().unwrap();
        assert_eq!((project.height(), project.width()), (3, 4));
        assert_eq!(project.layer_count(), 1);
    }

    #[test]
    fn test_failed_new_project_keeps_previous() {
        let mut workspace = Workspace::new();
        workspace.new_project(2, 2, 255).unwrap();
        assert!(workspace.new_project(-1, 2, 255).is_err());
        assert_eq!(workspace.project().unwrap().height(), 2);
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.collage");
        fs::write(&bad, "C2\n1 1\n255\nbackground normal\n0 0 0\n").unwrap();

        let mut workspace = Workspace::new();
        workspace.new_project(5, 5, 255).unwrap();

        assert!(matches!(
            workspace.load_project(&bad),
            Err(CollageError::MalformedFile { .. })
        ));
        assert!(matches!(
            workspace.load_project(&dir.path().join("missing.collage")),
            Err(CollageError::FileNotFound { .. })
        ));
        assert_eq!(workspace.project().unwrap().height(), 5);
    }

    #[test]
    fn test_add_image_from_ppm() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("dot.ppm");
        fs::write(&image, "P3\n1 1\n255\n9 8 7\n").unwrap();

        let mut workspace = Workspace::new();
        workspace.new_project(2, 2, 255).unwrap();
        let written = workspace.add_image_to_layer(1, 1, &image, "background").unwrap();

        assert_eq!(written, 1);
        let layer = workspace.project().unwrap().layer("background").unwrap();
        assert_eq!(layer.pixel(1, 1).unwrap(), Pixel::rgb(9, 8, 7));
    }

    #[test]
    fn test_save_image_writes_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.ppm");
        let mut workspace = Workspace::new();
        workspace.new_project(1, 2, 255).unwrap();

        let canvas = workspace.save_image(&path, "ppm").unwrap();

        assert_eq!(canvas, Canvas::new(1, 2));
        assert_eq!(fs::read_to_string(&path).unwrap(), "P3\n2 1\n255\n0 0 0\n0 0 0\n");
        assert!(matches!(
            workspace.save_image(&dir.path().join("flat.txt"), "ppm"),
            Err(CollageError::UnsupportedFormat { .. })
        ));
    }
}
