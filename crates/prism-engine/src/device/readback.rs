use std::sync::mpsc;

use super::DeviceError;

const BYTES_PER_PIXEL: u32 = 4;

/// CPU copy of an RGBA8 render target, rows tightly packed, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPixels {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl TargetPixels {
    /// RGBA of the pixel at (`x`, `y`), origin top-left.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * BYTES_PER_PIXEL) as usize;
        let p = self.data.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    pub fn center(&self) -> Option<[u8; 4]> {
        self.pixel(self.width / 2, self.height / 2)
    }
}

/// Copy rows must be padded to `COPY_BYTES_PER_ROW_ALIGNMENT`.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Copies `texture` into a mappable buffer and waits for the result.
///
/// Blocks until the GPU has finished every submitted frame.
pub(crate) fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> Result<TargetPixels, DeviceError> {
    if texture.format().block_copy_size(None) != Some(BYTES_PER_PIXEL) {
        return Err(DeviceError::Readback(format!(
            "unsupported target format {:?}",
            texture.format()
        )));
    }

    let (width, height) = (texture.width(), texture.height());
    let padded = padded_bytes_per_row(width);

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("prism readback buffer"),
        size: padded as u64 * height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("prism readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        texture.size(),
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| DeviceError::Readback(e.to_string()))?;

    rx.recv()
        .map_err(|e| DeviceError::Readback(e.to_string()))?
        .map_err(|e| DeviceError::Readback(e.to_string()))?;

    let row_bytes = (width * BYTES_PER_PIXEL) as usize;
    let mut data = Vec::with_capacity(row_bytes * height as usize);
    {
        let mapped = slice.get_mapped_range();
        for row in mapped.chunks(padded as usize).take(height as usize) {
            data.extend_from_slice(&row[..row_bytes]);
        }
    }
    staging.unmap();

    Ok(TargetPixels {
        width,
        height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(800), 3328);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn pixel_lookup_is_row_major() {
        let px = TargetPixels {
            width: 2,
            height: 2,
            data: vec![
                1, 0, 0, 255, 2, 0, 0, 255, //
                3, 0, 0, 255, 4, 0, 0, 255,
            ],
        };
        assert_eq!(px.pixel(0, 0), Some([1, 0, 0, 255]));
        assert_eq!(px.pixel(1, 0), Some([2, 0, 0, 255]));
        assert_eq!(px.pixel(0, 1), Some([3, 0, 0, 255]));
        assert_eq!(px.center(), Some([4, 0, 0, 255]));
        assert_eq!(px.pixel(2, 0), None);
    }
}
