//! Exact-color centroid and prevalence scans over a cropped frame region.
use image::RgbaImage;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::region::Region;
use crate::capture::debug::DebugImageSink;
use crate::common::{ColorQuery, Frame, Location};

pub type CountResult = IndexMap<ColorQuery, usize>;

/// Match count and centroid of one query, from [`ColorLocator::survey`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch {
    pub query: ColorQuery,
    pub count: usize,
    pub location: Option<Location>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum_x: u64,
    sum_y: u64,
    count: usize,
}

impl Accumulator {
    fn centroid(&self) -> Option<Location> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(Location::new(self.sum_x as f64 / n, self.sum_y as f64 / n))
    }
}

pub struct ColorLocator {
    region: Region,
    debug_sink: Option<Arc<dyn DebugImageSink>>,
}

impl ColorLocator {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            debug_sink: None,
        }
    }

    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugImageSink>) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Mean position of each query's matching pixels, in query order.
    /// Queries with no match are skipped, so the result may be shorter than
    /// `queries`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit inside `frame`.
    pub fn locate(&self, frame: &Frame, queries: &[ColorQuery]) -> Vec<Location> {
        let crop = self.crop(frame, "locate");
        queries
            .iter()
            .filter_map(|query| {
                let acc = Self::scan(&crop, query);
                debug!("locate {}: {} matching pixels", query, acc.count);
                acc.centroid()
            })
            .collect()
    }

    /// Number of matching pixels per distinct query, zero counts included.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit inside `frame`.
    pub fn count(&self, frame: &Frame, queries: &[ColorQuery]) -> CountResult {
        let crop = self.crop(frame, "count");
        let mut counts = CountResult::with_capacity(queries.len());
        for query in queries {
            if counts.contains_key(query) {
                continue;
            }
            let count = Self::scan(&crop, query).count;
            debug!("count {}: {} matching pixels", query, count);
            counts.insert(*query, count);
        }
        counts
    }

    /// Count and centroid of every query from a single crop, one entry per
    /// query in input order, misses included.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit inside `frame`.
    pub fn survey(&self, frame: &Frame, queries: &[ColorQuery]) -> Vec<ColorMatch> {
        let crop = self.crop(frame, "survey");
        queries
            .iter()
            .map(|query| {
                let acc = Self::scan(&crop, query);
                debug!("survey {}: {} matching pixels", query, acc.count);
                ColorMatch {
                    query: *query,
                    count: acc.count,
                    location: acc.centroid(),
                }
            })
            .collect()
    }

    fn crop(&self, frame: &Frame, label: &str) -> RgbaImage {
        let crop = self.region.crop(frame.image());
        if let Some(sink) = &self.debug_sink {
            if let Err(e) = sink.persist(label, &crop) {
                warn!("Failed to persist {} debug crop: {}", label, e);
            }
        }
        crop
    }

    // Flat row-major walk: row = idx / width, col = idx % width.
    fn scan(crop: &RgbaImage, query: &ColorQuery) -> Accumulator {
        let width = crop.width() as usize;
        crop.as_raw()
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, pixel)| query.matches(pixel))
            .fold(Accumulator::default(), |mut acc, (idx, _)| {
                acc.sum_x += (idx % width) as u64;
                acc.sum_y += (idx / width) as u64;
                acc.count += 1;
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageError, Rgba};
    use std::sync::Mutex;

    const Q: ColorQuery = ColorQuery::new(68, 221, 255, 255);
    const OTHER: ColorQuery = ColorQuery::new(0, 0, 255, 255);
    const BACKGROUND: Rgba<u8> = Rgba([10, 10, 10, 255]);

    fn frame_with(width: u32, height: u32, pixels: &[(u32, u32, ColorQuery)]) -> Frame {
        let mut image: RgbaImage = ImageBuffer::from_pixel(width, height, BACKGROUND);
        for &(col, row, color) in pixels {
            image.put_pixel(col, row, Rgba(color.0));
        }
        Frame::captured(image)
    }

    fn full(width: u32, height: u32) -> ColorLocator {
        ColorLocator::new(Region::new(0, 0, height, width).unwrap())
    }

    #[test]
    fn single_pixel_centroid_is_its_position() {
        let frame = frame_with(4, 3, &[(2, 1, Q)]);
        assert_eq!(full(4, 3).locate(&frame, &[Q]), vec![Location::new(2.0, 1.0)]);
    }

    #[test]
    fn centroid_averages_matching_pixels() {
        let frame = frame_with(4, 3, &[(0, 0, Q), (2, 0, Q)]);
        assert_eq!(full(4, 3).locate(&frame, &[Q]), vec![Location::new(1.0, 0.0)]);
    }

    #[test]
    fn centroid_can_be_fractional() {
        let frame = frame_with(4, 3, &[(0, 0, Q), (1, 1, Q), (3, 2, Q)]);
        let expected = Location::new(4.0 / 3.0, 1.0);
        assert_eq!(full(4, 3).locate(&frame, &[Q]), vec![expected]);
    }

    #[test]
    fn absent_color_yields_no_location_and_zero_count() {
        let frame = frame_with(4, 3, &[]);
        let locator = full(4, 3);
        assert!(locator.locate(&frame, &[Q]).is_empty());
        let counts = locator.count(&frame, &[Q]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&Q], 0);
    }

    #[test]
    fn locate_skips_misses_and_keeps_query_order() {
        let missing = ColorQuery::new(1, 2, 3, 4);
        let frame = frame_with(4, 3, &[(3, 2, OTHER), (1, 0, Q)]);
        let locations = full(4, 3).locate(&frame, &[OTHER, missing, Q]);
        assert_eq!(
            locations,
            vec![Location::new(3.0, 2.0), Location::new(1.0, 0.0)]
        );
    }

    #[test]
    fn count_has_one_entry_per_distinct_query_even_when_all_zero() {
        let frame = frame_with(5, 5, &[]);
        let queries = [Q, OTHER, Q, ColorQuery::new(1, 1, 1, 1)];
        let counts = full(5, 5).count(&frame, &queries);
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&c| c == 0));
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![Q, OTHER, queries[3]]);
    }

    #[test]
    fn duplicate_queries_receive_identical_results() {
        let frame = frame_with(4, 3, &[(0, 2, Q), (3, 0, Q)]);
        let locator = full(4, 3);
        let locations = locator.locate(&frame, &[Q, Q]);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0], locations[1]);
        assert_eq!(locator.count(&frame, &[Q, Q])[&Q], 2);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let frame = frame_with(6, 4, &[(1, 1, Q), (5, 3, OTHER), (2, 3, Q)]);
        let locator = full(6, 4);
        assert_eq!(
            locator.locate(&frame, &[Q, OTHER]),
            locator.locate(&frame, &[Q, OTHER])
        );
        assert_eq!(
            locator.count(&frame, &[Q, OTHER]),
            locator.count(&frame, &[Q, OTHER])
        );
    }

    #[test]
    fn match_is_exact_on_all_four_channels() {
        let near = ColorQuery::new(68, 221, 255, 254);
        let frame = frame_with(3, 3, &[(1, 1, near)]);
        let locator = full(3, 3);
        assert!(locator.locate(&frame, &[Q]).is_empty());
        assert_eq!(locator.count(&frame, &[Q])[&Q], 0);
    }

    #[test]
    fn coordinates_are_local_to_the_crop() {
        // Pixel at frame (col 5, row 4); region starts at row 3, col 2.
        let frame = frame_with(10, 8, &[(5, 4, Q), (0, 0, Q)]);
        let locator = ColorLocator::new(Region::new(3, 2, 7, 9).unwrap());
        assert_eq!(locator.locate(&frame, &[Q]), vec![Location::new(3.0, 1.0)]);
        assert_eq!(locator.count(&frame, &[Q])[&Q], 1);
    }

    #[test]
    #[should_panic]
    fn region_outside_frame_fails_fast() {
        let frame = frame_with(4, 3, &[]);
        full(5, 3).locate(&frame, &[Q]);
    }

    #[test]
    fn survey_keeps_misses_in_place_and_agrees_with_locate_and_count() {
        let missing = ColorQuery::new(1, 2, 3, 4);
        let frame = frame_with(4, 3, &[(0, 0, Q), (2, 0, Q), (3, 2, OTHER)]);
        let locator = full(4, 3);
        let survey = locator.survey(&frame, &[Q, missing, OTHER]);

        assert_eq!(
            survey,
            vec![
                ColorMatch {
                    query: Q,
                    count: 2,
                    location: Some(Location::new(1.0, 0.0))
                },
                ColorMatch {
                    query: missing,
                    count: 0,
                    location: None
                },
                ColorMatch {
                    query: OTHER,
                    count: 1,
                    location: Some(Location::new(3.0, 2.0))
                },
            ]
        );
        let located: Vec<_> = survey.iter().filter_map(|m| m.location).collect();
        assert_eq!(located, locator.locate(&frame, &[Q, missing, OTHER]));
        let counts = locator.count(&frame, &[Q, missing, OTHER]);
        assert!(survey.iter().all(|m| counts[&m.query] == m.count));
    }

    struct RecordingSink {
        labels: Mutex<Vec<(String, (u32, u32))>>,
        fail: bool,
    }

    impl DebugImageSink for RecordingSink {
        fn persist(&self, label: &str, crop: &RgbaImage) -> Result<(), ImageError> {
            self.labels
                .lock()
                .unwrap()
                .push((label.to_string(), crop.dimensions()));
            if self.fail {
                return Err(ImageError::IoError(std::io::Error::other("disk full")));
            }
            Ok(())
        }
    }

    #[test]
    fn debug_sink_receives_crop_per_call() {
        let sink = Arc::new(RecordingSink {
            labels: Mutex::new(Vec::new()),
            fail: false,
        });
        let locator =
            ColorLocator::new(Region::new(1, 1, 3, 4).unwrap()).with_debug_sink(sink.clone());
        let frame = frame_with(5, 5, &[]);
        locator.locate(&frame, &[Q]);
        locator.count(&frame, &[Q]);
        locator.survey(&frame, &[Q, OTHER]);
        assert_eq!(
            *sink.labels.lock().unwrap(),
            vec![
                ("locate".to_string(), (3, 2)),
                ("count".to_string(), (3, 2)),
                ("survey".to_string(), (3, 2))
            ]
        );
    }

    #[test]
    fn failing_debug_sink_does_not_change_results() {
        let sink = Arc::new(RecordingSink {
            labels: Mutex::new(Vec::new()),
            fail: true,
        });
        let frame = frame_with(4, 3, &[(2, 1, Q)]);
        let locator = full(4, 3).with_debug_sink(sink);
        assert_eq!(locator.locate(&frame, &[Q]), vec![Location::new(2.0, 1.0)]);
        assert_eq!(locator.count(&frame, &[Q])[&Q], 1);
    }
}
