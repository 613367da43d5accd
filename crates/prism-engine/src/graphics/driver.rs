use glam::Mat4;
use winit::window::Window;

use crate::camera::Camera;
use crate::device::{FrameError, OutputTarget, RenderDevice};
use crate::geometry::{GeometryBuffer, Mesh};
use crate::shader::ShaderProgram;

use super::{GraphicsConfig, InitError};

/// Frame driver: owns the device and everything drawn with it.
///
/// Components are created in order device, camera, geometry, shader and
/// released in the reverse order.
pub struct Graphics<'w> {
    device: RenderDevice<'w>,
    camera: Option<Camera>,
    geometry: Option<GeometryBuffer>,
    shader: Option<ShaderProgram>,
    clear_color: [f32; 4],
}

impl Default for Graphics<'_> {
    fn default() -> Self {
        Self {
            device: RenderDevice::new(),
            camera: None,
            geometry: None,
            shader: None,
            clear_color: GraphicsConfig::default().clear_color,
        }
    }
}

impl Graphics<'static> {
    /// Frame driver rendering `mesh` into an offscreen target.
    pub fn headless(config: &GraphicsConfig, mesh: Mesh) -> Result<Self, InitError> {
        let mut graphics = Self::new();
        graphics.initialize_with(OutputTarget::Offscreen, config, mesh)?;
        Ok(graphics)
    }
}

impl<'w> Graphics<'w> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes everything for `window` with the default triangle.
    pub fn initialize(
        &mut self,
        window: &'w Window,
        config: &GraphicsConfig,
    ) -> Result<(), InitError> {
        self.initialize_with(OutputTarget::Window(window), config, Mesh::triangle())
    }

    pub fn initialize_with(
        &mut self,
        output: OutputTarget<'w>,
        config: &GraphicsConfig,
        mesh: Mesh,
    ) -> Result<(), InitError> {
        self.clear_color = config.clear_color;

        self.device
            .initialize(output, config.device_params())
            .map_err(InitError::from)
            .inspect_err(|e| log::error!("{e}"))?;

        self.camera = Some(Camera::new());

        let mut geometry = GeometryBuffer::new();
        let gpu = self.device.get_device()?;
        geometry
            .initialize(gpu, mesh)
            .map_err(InitError::from)
            .inspect_err(|e| log::error!("{e}"))?;
        self.geometry = Some(geometry);

        let mut shader = ShaderProgram::new();
        shader
            .initialize(&self.device, &config.shaders)
            .map_err(InitError::from)
            .inspect_err(|e| log::error!("{e}"))?;
        self.shader = Some(shader);

        Ok(())
    }

    /// Per-frame update; currently just renders.
    pub fn frame(&mut self) -> Result<(), FrameError> {
        self.render()
    }

    /// Renders the scene with the device's world and projection matrices
    /// and the camera's view.
    pub fn render(&mut self) -> Result<(), FrameError> {
        let Some(camera) = self.camera.as_mut() else {
            return Err(FrameError::NotReady("camera"));
        };
        camera.render();
        let view = camera.view_matrix();

        let (Some(world), Some(projection)) =
            (self.device.world_matrix(), self.device.projection_matrix())
        else {
            return Err(FrameError::NotInitialized);
        };
        self.render_with(world, view, projection)
    }

    /// Clears, draws the geometry with the given matrices and presents.
    pub fn render_with(&self, world: Mat4, view: Mat4, projection: Mat4) -> Result<(), FrameError> {
        let Some(geometry) = self.geometry.as_ref() else {
            return Err(FrameError::NotReady("geometry buffer"));
        };
        let Some(shader) = self.shader.as_ref() else {
            return Err(FrameError::NotReady("shader program"));
        };
        let queue = self.device.get_queue().map_err(|_| FrameError::NotInitialized)?;

        let [r, g, b, a] = self.clear_color;
        let mut frame = self.device.begin_frame(r, g, b, a)?;
        {
            let mut pass = self.device.begin_pass(&mut frame)?;
            geometry.render(&mut pass)?;
            shader.render(queue, &mut pass, geometry.index_count(), world, view, projection)?;
        }
        self.device.end_frame(frame)
    }

    pub fn device(&self) -> &RenderDevice<'w> {
        &self.device
    }

    pub fn is_initialized(&self) -> bool {
        self.device.is_initialized()
            && self.geometry.as_ref().is_some_and(GeometryBuffer::is_initialized)
            && self.shader.as_ref().is_some_and(ShaderProgram::is_initialized)
    }

    /// Releases shader, geometry, camera, then the device. Safe to call
    /// repeatedly.
    pub fn shutdown(&mut self) {
        if let Some(mut shader) = self.shader.take() {
            shader.shutdown();
        }
        if let Some(mut geometry) = self.geometry.take() {
            geometry.shutdown();
        }
        self.camera = None;
        self.device.shutdown();
    }
}

impl Drop for Graphics<'_> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
