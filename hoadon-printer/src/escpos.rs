//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data for the 80mm
//! receipt profile. The builder only ever appends; the finished stream is
//! handed out by [`EscPosBuilder::build`], which consumes the builder.

use crate::encoding::CodePage;
use crate::error::{EncodingError, EncodingResult};
use crate::layout::{Align, dashed_line};

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// Largest QR payload the store-data length field can describe
/// (`pL + pH * 256 = len + 3` must fit in 16 bits)
pub const QR_MAX_PAYLOAD: usize = 0xFFFF - 3;

/// Character scale selected with `GS ! n`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scale {
    #[default]
    Normal,
    DoubleHeight,
    DoubleWidth,
    DoubleSize,
}

impl Scale {
    fn byte(self) -> u8 {
        match self {
            Scale::Normal => 0x00,
            Scale::DoubleHeight => 0x01,
            Scale::DoubleWidth => 0x10,
            Scale::DoubleSize => 0x11,
        }
    }
}

/// QR error-correction level (function 169)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QrErrorLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl QrErrorLevel {
    fn byte(self) -> u8 {
        match self {
            QrErrorLevel::L => 0x30,
            QrErrorLevel::M => 0x31,
            QrErrorLevel::Q => 0x32,
            QrErrorLevel::H => 0x33,
        }
    }
}

/// Encode a QR block: module size, error correction, store data, print
///
/// Rejects payloads the length field cannot describe instead of
/// truncating them into a code that scans to something else.
pub fn qr_block(data: &[u8], module_size: u8, level: QrErrorLevel) -> EncodingResult<Vec<u8>> {
    if !(1..=16).contains(&module_size) {
        return Err(EncodingError::QrModuleSize(module_size));
    }
    if data.len() > QR_MAX_PAYLOAD {
        return Err(EncodingError::QrPayloadTooLong {
            len: data.len(),
            max: QR_MAX_PAYLOAD,
        });
    }

    let mut out = Vec::with_capacity(data.len() + 32);

    // Function 167: module size
    out.extend_from_slice(&[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, module_size]);

    // Function 169: error correction level
    out.extend_from_slice(&[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, level.byte()]);

    // Function 180: store data. The length field counts the 3 header bytes (31 50 30).
    let declared = data.len() + 3;
    let p_l = (declared & 0xFF) as u8;
    let p_h = (declared >> 8) as u8;
    out.extend_from_slice(&[GS, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
    out.extend_from_slice(data);

    // Function 181: print
    out.extend_from_slice(&[GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

    Ok(out)
}

/// ESC/POS command builder
///
/// Text is encoded with the builder's [`CodePage`] as it is appended.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
    code_page: CodePage,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// 80mm paper with the standard font is 48 characters.
    pub fn new(width: usize) -> Self {
        Self::with_code_page(width, CodePage::default())
    }

    pub fn with_code_page(width: usize, code_page: CodePage) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[ESC, 0x40]);
        Self {
            buf,
            width,
            code_page,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text without a line break
    pub fn text(&mut self, s: &str) -> &mut Self {
        let bytes = self.code_page.encode(s);
        self.buf.extend_from_slice(&bytes);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Select justification (ESC a n)
    pub fn align(&mut self, align: Align) -> &mut Self {
        let n = match align {
            Align::Start => 0x00,
            Align::Center => 0x01,
            Align::End => 0x02,
        };
        self.buf.extend_from_slice(&[ESC, 0x61, n]);
        self
    }

    pub fn center(&mut self) -> &mut Self {
        self.align(Align::Center)
    }

    pub fn left(&mut self) -> &mut Self {
        self.align(Align::Start)
    }

    pub fn right(&mut self) -> &mut Self {
        self.align(Align::End)
    }

    // === Text Style ===

    /// Enable bold text (ESC E 1)
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, 0x45, 0x01]);
        self
    }

    /// Disable bold text (ESC E 0)
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, 0x45, 0x00]);
        self
    }

    /// Select character size (GS ! n)
    pub fn scale(&mut self, scale: Scale) -> &mut Self {
        self.buf.extend_from_slice(&[GS, 0x21, scale.byte()]);
        self
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.scale(Scale::Normal)
    }

    // === Separators ===

    /// Print a full-width divider
    pub fn divider(&mut self) -> &mut Self {
        let rule = dashed_line(self.width);
        self.line(&rule)
    }

    // === Paper Control ===

    /// Partial cut (GS V 1)
    pub fn cut_partial(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[GS, 0x56, 0x01]);
        self
    }

    // === QR Code ===

    /// Append a QR block
    ///
    /// The payload is encoded with the builder's code page before its
    /// length is taken. On error nothing is appended.
    pub fn qr_code(
        &mut self,
        data: &str,
        module_size: u8,
        level: QrErrorLevel,
    ) -> EncodingResult<&mut Self> {
        let payload = self.code_page.encode(data);
        let block = qr_block(&payload, module_size, level)?;
        self.buf.extend_from_slice(&block);
        Ok(self)
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Reset printer to default state (ESC @)
    pub fn reset(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, 0x40]);
        self
    }

    // === Build ===

    /// Finish the stream
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

// ============================================================================
// Image Processing
// ============================================================================

/// Rasterize a logo file into a centered `GS v 0` block
///
/// The image is scaled down to at most 384 dots wide and thresholded to
/// 1-bit; transparent pixels print white.
#[cfg(feature = "logo")]
#[tracing::instrument]
pub fn raster_logo(path: &str) -> EncodingResult<Vec<u8>> {
    use image::GenericImageView;

    let img = image::open(path).map_err(|e| EncodingError::Image(e.to_string()))?;
    let (w, h) = img.dimensions();
    tracing::info!(width = w, height = h, "logo image opened");

    let max_width = 384;
    let (new_w, new_h) = if w > max_width {
        let ratio = max_width as f64 / w as f64;
        (max_width, ((h as f64 * ratio) as u32).max(1))
    } else {
        (w, h)
    };
    if new_w == 0 || new_h > 0xFFFF {
        return Err(EncodingError::Image(format!("unsupported size {}x{}", w, h)));
    }

    let rgba = img
        .resize_exact(new_w, new_h, image::imageops::FilterType::Nearest)
        .to_rgba8();
    let x_bytes = new_w.div_ceil(8);

    let mut data = Vec::with_capacity((x_bytes * new_h) as usize + 12);
    data.extend_from_slice(&[ESC, 0x61, 0x01]);
    data.extend_from_slice(&[GS, 0x76, 0x30, 0x00]);
    data.push(x_bytes as u8);
    data.push((x_bytes >> 8) as u8);
    data.push(new_h as u8);
    data.push((new_h >> 8) as u8);

    for y in 0..new_h {
        for x_byte in 0..x_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = x_byte * 8 + bit;
                if x >= new_w {
                    continue;
                }
                let pixel = rgba.get_pixel(x, y);
                if pixel[3] < 128 {
                    continue;
                }
                let luma = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
                if luma < 128.0 {
                    byte |= 1 << (7 - bit);
                }
            }
            data.push(byte);
        }
    }
    data.push(b'\n');

    Ok(data)
}
