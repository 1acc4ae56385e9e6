use crate::background::blob_detector::ColorBlobDetector;
use crate::background::pixel_sampler::{self, Side};
use crate::background::properties::{BackgroundProperties, EdgeTier};
use crate::imaging::blur::box_blur;
use crate::imaging::color::{brightness, to_gray, to_hsv_full};
use crate::imaging::edges::{canny, count_edge_pixels};
use crate::imaging::pad::{pad_to_square_replicate, unpad_from_square, unpad_plane};
use crate::imaging::resize::resize_to_width;
use crate::imaging::stats::masked_mean_stddev;
use crate::segmentation::domain::person_segmenter::PersonSegmenter;
use crate::shared::config::AnalyzerConfig;
use crate::shared::constants::{segmentation_work_width, SEGMENTATION_WORK_SIZE};
use crate::shared::defect::Defect;
use crate::shared::frame::Frame;

const CANNY_LOW: f64 = 30.0;
const CANNY_HIGH: f64 = 90.0;
const EDGE_BLUR_KERNEL: usize = 5;
/// Person-probability plane value above this is treated as background in
/// the color-statistics mask.
const MASK_CUTOFF: f32 = 0.5;

/// Judges whether the background of a passport crop is uniform and bright.
///
/// All probes run on a background composite at segmentation working
/// resolution: the crop is resized to the working width, padded to a
/// square, segmented, and the person is painted black. Individual probes
/// abstain (contribute nothing) when their preconditions fail, so a frame
/// is only rejected on positive evidence; a missing composite or person
/// sample aborts the whole measurement.
pub struct BackgroundAnalyzer {
    segmenter: Box<dyn PersonSegmenter>,
    config: AnalyzerConfig,
}

impl BackgroundAnalyzer {
    pub fn new(segmenter: Box<dyn PersonSegmenter>, config: AnalyzerConfig) -> Self {
        Self { segmenter, config }
    }

    /// Run all background probes and convert the result into defects.
    pub fn analyze(&mut self, crop: &Frame) -> Result<Vec<Defect>, Box<dyn std::error::Error>> {
        let props = self.measure(crop)?;
        let mut defects = Vec::new();
        if !props.is_uniform() {
            defects.push(Defect::NotUniform);
        }
        if !props.is_bright(self.config.brightness_cutoff) {
            defects.push(Defect::TooDark);
        }
        Ok(defects)
    }

    /// Measure the background without judging it.
    pub fn measure(
        &mut self,
        crop: &Frame,
    ) -> Result<BackgroundProperties, Box<dyn std::error::Error>> {
        let work_width = segmentation_work_width();
        let working = resize_to_width(crop, work_width);
        let padded = pad_to_square_replicate(&working, SEGMENTATION_WORK_SIZE);
        self.segmenter.segment(&padded)?;

        let Some(square_composite) = self.segmenter.background() else {
            log::warn!("segmenter produced no background composite, abstaining");
            return Ok(BackgroundProperties::default());
        };
        let composite = unpad_from_square(&square_composite, work_width);
        let (w, h) = (composite.width() as usize, composite.height() as usize);
        let image_area = (w * h) as f64;

        // Without a person sample the silhouette cannot be discounted and
        // every probe would count it against the background.
        let Some(seed) = pixel_sampler::find_person_pixel(&composite) else {
            log::warn!("no person pixel found in composite, abstaining");
            return Ok(BackgroundProperties::default());
        };
        let mut detector = ColorBlobDetector::new();
        detector.process(&composite, seed);
        let person_area = detector.max_area();
        let person_perimeter = detector.max_perimeter();

        let blob_coverage_ok = self.blob_coverage(&composite, image_area, person_area);
        let edge_tier = self.edge_activity(&composite, image_area, person_perimeter);
        let (color_plain, brightness) = self.color_statistics(&composite, work_width);

        Ok(BackgroundProperties {
            blob_coverage_ok,
            edge_tier,
            color_plain,
            brightness,
        })
    }

    pub fn close(&mut self) {
        self.segmenter.close();
    }

    /// Grow a blob from each upper corner and check that blob area plus
    /// person area explains (nearly) the whole frame. Both sides must leave
    /// unexplained area before the probe fails.
    fn blob_coverage(
        &self,
        composite: &Frame,
        image_area: f64,
        person_area: f64,
    ) -> Option<bool> {
        let epsilon = image_area / self.config.uniformity_epsilon_divisor as f64;
        let mut sampled = false;
        let mut uniform_side = false;
        let mut detector = ColorBlobDetector::new();
        for side in [Side::Left, Side::Right] {
            let Some(seed) = pixel_sampler::find_background_pixel(composite, side) else {
                continue;
            };
            sampled = true;
            detector.process(composite, seed);
            let unexplained = image_area - person_area - detector.total_area();
            if unexplained <= epsilon {
                uniform_side = true;
            }
        }
        if !sampled {
            log::debug!("no background sample pixel on either side, abstaining");
            return None;
        }
        Some(uniform_side)
    }

    /// Edge pixels left over once the person outline is discounted.
    fn edge_activity(
        &self,
        composite: &Frame,
        image_area: f64,
        person_perimeter: f64,
    ) -> Option<EdgeTier> {
        let (w, h) = (composite.width() as usize, composite.height() as usize);
        let mut gray = to_gray(composite);
        box_blur(&mut gray, w, h, 1, EDGE_BLUR_KERNEL);
        let edges = canny(&gray, w, h, CANNY_LOW, CANNY_HIGH);
        let residual = (count_edge_pixels(&edges) as f64 - person_perimeter).max(0.0);
        let base = image_area / self.config.edge_epsilon_divisor as f64;
        Some(EdgeTier::from_edge_count(residual, base))
    }

    /// HSV spread and mean brightness over segmented background pixels.
    fn color_statistics(&self, composite: &Frame, work_width: u32) -> (Option<bool>, Option<f64>) {
        let Some(plane) = self.segmenter.masked_person() else {
            return (None, None);
        };
        let size = SEGMENTATION_WORK_SIZE;
        let plane = unpad_plane(&plane, size, size, work_width);
        let mask: Vec<u8> = plane
            .iter()
            .map(|&v| if v > MASK_CUTOFF { 255 } else { 0 })
            .collect();

        let hsv = to_hsv_full(composite);
        let color_plain = masked_mean_stddev(&hsv, 3, &mask).map(|(_, stddevs)| {
            stddevs[0] < self.config.hue_stddev_threshold
                && stddevs[2] < self.config.value_stddev_threshold
        });
        let mean_brightness = masked_mean_stddev(composite.data(), 3, &mask)
            .map(|(means, _)| brightness([means[0], means[1], means[2]]));
        (color_plain, mean_brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Segments by color: exactly-black pixels count as the person, the
    /// rest as background. The composite is the input unchanged, as if the
    /// person had already been painted over.
    struct StubSegmenter {
        image: Option<Frame>,
        fail: bool,
        produce: bool,
    }

    impl StubSegmenter {
        fn black_is_person() -> Self {
            Self {
                image: None,
                fail: false,
                produce: true,
            }
        }

        fn plane(&self, person: f32, background: f32) -> Option<Vec<f32>> {
            self.image.as_ref().map(|i| {
                i.data()
                    .chunks_exact(3)
                    .map(|p| if p == [0, 0, 0] { person } else { background })
                    .collect()
            })
        }
    }

    impl PersonSegmenter for StubSegmenter {
        fn segment(&mut self, image: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail {
                return Err("inference failed".into());
            }
            self.image = Some(image.clone());
            Ok(())
        }

        fn masked_person(&self) -> Option<Vec<f32>> {
            if !self.produce {
                return None;
            }
            self.plane(0.0, 1.0)
        }

        fn masked_background(&self) -> Option<Vec<f32>> {
            if !self.produce {
                return None;
            }
            self.plane(1.0, 0.0)
        }

        fn background(&self) -> Option<Frame> {
            if !self.produce {
                return None;
            }
            self.image.clone()
        }

        fn foreground(&self) -> Option<Frame> {
            None
        }

        fn close(&mut self) {
            self.image = None;
        }
    }

    fn analyzer(stub: StubSegmenter) -> BackgroundAnalyzer {
        BackgroundAnalyzer::new(Box::new(stub), AnalyzerConfig::default())
    }

    /// Black person block over the lower center, where the sampler looks.
    fn with_person(mut crop: Frame) -> Frame {
        let (w, h) = (crop.width(), crop.height());
        for y in h * 4 / 9..h {
            for x in w * 5 / 14..w * 9 / 14 {
                let i = ((y * w + x) * 3) as usize;
                crop.data_mut()[i..i + 3].copy_from_slice(&[0, 0, 0]);
            }
        }
        crop
    }

    /// Coarse red/white checkerboard crop.
    fn busy_crop() -> Frame {
        let mut crop = Frame::filled(70, 90, [230, 230, 230]);
        for y in 0..90u32 {
            for x in 0..70u32 {
                if (x / 10 + y / 10) % 2 == 0 {
                    let i = ((y * 70 + x) * 3) as usize;
                    crop.data_mut()[i..i + 3].copy_from_slice(&[200, 30, 30]);
                }
            }
        }
        crop
    }

    #[test]
    fn test_plain_bright_background_passes() {
        let crop = with_person(Frame::filled(70, 90, [220, 220, 220]));
        let defects = analyzer(StubSegmenter::black_is_person())
            .analyze(&crop)
            .unwrap();
        assert!(defects.is_empty());
    }

    #[test]
    fn test_dark_background_is_too_dark() {
        let crop = with_person(Frame::filled(70, 90, [40, 40, 40]));
        let defects = analyzer(StubSegmenter::black_is_person())
            .analyze(&crop)
            .unwrap();
        assert!(defects.contains(&Defect::TooDark));
    }

    #[test]
    fn test_busy_background_is_not_uniform() {
        // Blob coverage and edge density both accumulate evidence.
        let crop = with_person(busy_crop());
        let defects = analyzer(StubSegmenter::black_is_person())
            .analyze(&crop)
            .unwrap();
        assert!(defects.contains(&Defect::NotUniform));
    }

    #[test]
    fn test_no_person_sample_abstains() {
        // Busy crop, but the composite has no person pixel to discount, so
        // no verdict is possible however bad the background looks.
        let defects = analyzer(StubSegmenter::black_is_person())
            .analyze(&busy_crop())
            .unwrap();
        assert!(defects.is_empty());
    }

    #[test]
    fn test_segmentation_failure_propagates() {
        let crop = Frame::filled(70, 90, [220, 220, 220]);
        let mut stub = StubSegmenter::black_is_person();
        stub.fail = true;
        assert!(analyzer(stub).analyze(&crop).is_err());
    }

    #[test]
    fn test_missing_composite_abstains() {
        let crop = Frame::filled(70, 90, [40, 40, 40]);
        let mut stub = StubSegmenter::black_is_person();
        stub.produce = false;
        let defects = analyzer(stub).analyze(&crop).unwrap();
        assert!(defects.is_empty());
    }
}
