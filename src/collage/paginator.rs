use super::ImageRef;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub image: ImageRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub cells: Vec<Cell>,
}

/// splits `images` into pages of at most `images_per_page` cells, keeping the input order
pub fn paginate(images: &[ImageRef], images_per_page: usize) -> Vec<Page> {
    if images_per_page == 0 {
        return Vec::new();
    }

    images
        .chunks(images_per_page)
        .enumerate()
        .map(|(index, chunk)| Page {
            index,
            cells: chunk
                .iter()
                .enumerate()
                .map(|(index, image)| Cell { index, image: image.clone() })
                .collect(),
        })
        .collect()
}

pub const fn page_count(image_count: usize, images_per_page: usize) -> usize {
    if images_per_page == 0 { 0 } else { image_count.div_ceil(images_per_page) }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::collage::Mode;
    use crate::utilities::test_fixtures;

    #[test]
    fn test_page_counts() {
        for images_per_page in 1..=9 {
            for image_count in 0..40 {
                let images = test_fixtures::image_refs(image_count);
                let pages = paginate(&images, images_per_page);

                assert_eq!(pages.len(), image_count.div_ceil(images_per_page));
                assert_eq!(pages.len(), page_count(image_count, images_per_page));

                let expected_last = match image_count % images_per_page {
                    0 => images_per_page,
                    rest => rest,
                };
                if let Some(last) = pages.last() {
                    assert_eq!(last.cells.len(), expected_last);
                }
            }
        }
    }

    #[test]
    fn test_cell_assignment_is_ordered_bijection() {
        let images = test_fixtures::image_refs(23);
        let pages = paginate(&images, 4);

        let flattened = pages
            .iter()
            .flat_map(|page| page.cells.iter().map(move |cell| (page.index, cell)))
            .collect::<Vec<_>>();
        assert_eq!(flattened.len(), images.len());

        for (global_index, (page_index, cell)) in flattened.into_iter().enumerate() {
            assert_eq!(page_index, global_index / 4);
            assert_eq!(cell.index, global_index % 4);
            assert_eq!(cell.image, images[global_index]);
        }
    }

    #[test]
    fn test_zero_images() {
        assert!(paginate(&[], 4).is_empty());
        assert!(paginate(&test_fixtures::image_refs(3), 0).is_empty());
    }

    #[test]
    fn test_five_images_four_mode() {
        let images = test_fixtures::image_refs(5);
        let pages = paginate(&images, Mode::Four.geometry().images_per_page);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].cells.iter().map(|c| c.index).collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert_eq!(pages[1].cells, [Cell { index: 0, image: images[4].clone() }]);
    }

    #[test]
    fn test_ten_images_nine_mode() {
        let images = test_fixtures::image_refs(10);
        let pages = paginate(&images, Mode::Nine.geometry().images_per_page);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].cells.len(), 9);
        assert_eq!(pages[1].cells, [Cell { index: 0, image: images[9].clone() }]);
    }

    #[test]
    fn test_paginate_is_deterministic() {
        let images = test_fixtures::image_refs(17);
        assert_eq!(paginate(&images, 9), paginate(&images, 9));
    }
}
