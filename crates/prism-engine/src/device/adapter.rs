use std::fmt;

const MIB: u64 = 1024 * 1024;

/// Adapter facts kept for diagnostics after the adapter handle is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDiagnostics {
    pub name: String,
    pub backend: wgpu::Backend,
    pub device_type: wgpu::DeviceType,
    pub driver: String,

    /// Largest buffer the device accepts, in MiB.
    ///
    /// wgpu does not expose dedicated video memory; this is the nearest
    /// memory figure available on every backend.
    pub memory_mb: u64,

    /// Name of the primary output, when one was enumerated.
    pub output: Option<String>,
}

impl AdapterDiagnostics {
    pub(crate) fn collect(
        info: &wgpu::AdapterInfo,
        limits: &wgpu::Limits,
        output: Option<String>,
    ) -> Self {
        Self::from_parts(
            &info.name,
            info.backend,
            info.device_type,
            &info.driver,
            &info.driver_info,
            limits.max_buffer_size,
            output,
        )
    }

    fn from_parts(
        name: &str,
        backend: wgpu::Backend,
        device_type: wgpu::DeviceType,
        driver: &str,
        driver_info: &str,
        max_buffer_size: u64,
        output: Option<String>,
    ) -> Self {
        let driver = if driver_info.is_empty() {
            driver.to_string()
        } else {
            format!("{driver} ({driver_info})")
        };

        Self {
            name: name.to_string(),
            backend,
            device_type,
            driver,
            memory_mb: max_buffer_size / MIB,
            output,
        }
    }

    pub fn is_software(&self) -> bool {
        self.device_type == wgpu::DeviceType::Cpu
    }
}

impl fmt::Display for AdapterDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{:?}, {:?}] {} MiB",
            self.name, self.backend, self.device_type, self.memory_mb
        )?;
        if !self.driver.is_empty() {
            write!(f, ", driver {}", self.driver)?;
        }
        if let Some(output) = &self.output {
            write!(f, ", output {output}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu(driver_info: &str, output: Option<String>) -> AdapterDiagnostics {
        AdapterDiagnostics::from_parts(
            "Test GPU",
            wgpu::Backend::Vulkan,
            wgpu::DeviceType::DiscreteGpu,
            "test",
            driver_info,
            256 * MIB,
            output,
        )
    }

    #[test]
    fn memory_is_reported_in_mib() {
        let d = gpu("", Some("DP-1".into()));
        assert_eq!(d.memory_mb, 256);
        assert_eq!(d.name, "Test GPU");
        assert!(!d.is_software());
        assert_eq!(
            d.to_string(),
            "Test GPU [Vulkan, DiscreteGpu] 256 MiB, driver test, output DP-1"
        );
    }

    #[test]
    fn driver_info_is_appended() {
        assert_eq!(gpu("1.2.3", None).driver, "test (1.2.3)");
    }
}
