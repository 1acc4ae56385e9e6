pub mod person_segmenter;
pub mod segmentation_mask;
